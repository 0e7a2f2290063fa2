//! Enumeration types for the trading gateway.
//!
//! Wire names follow the gateway's upper-snake-case constants, e.g.
//! `"SELL_SHORT"` or `"FILLED_PART"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Trading environment: real money or paper trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrdEnv {
    /// Real-money trading
    #[default]
    Real,
    /// Simulated (paper) trading
    Simulate,
}

impl TrdEnv {
    /// Returns `true` for the real-money environment.
    pub fn is_real(&self) -> bool {
        matches!(self, TrdEnv::Real)
    }
}

impl fmt::Display for TrdEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrdEnv::Real => write!(f, "REAL"),
            TrdEnv::Simulate => write!(f, "SIMULATE"),
        }
    }
}

/// Market segment a trade context is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrdMarket {
    /// Hong Kong
    Hk,
    /// United States
    Us,
    /// Mainland China A-shares
    Cn,
    /// Hong Kong Connect (A-shares via HK)
    Hkcc,
    /// Unknown market (forward-compatibility)
    #[serde(other)]
    None,
}

impl TrdMarket {
    /// Returns `true` if the market accepts orders in the given environment.
    ///
    /// HK and US support both real and simulated trading; every other
    /// market is simulate-only.
    pub fn supports(&self, env: TrdEnv) -> bool {
        match self {
            TrdMarket::Hk | TrdMarket::Us => true,
            _ => env == TrdEnv::Simulate,
        }
    }
}

impl fmt::Display for TrdMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrdMarket::Hk => "HK",
            TrdMarket::Us => "US",
            TrdMarket::Cn => "CN",
            TrdMarket::Hkcc => "HKCC",
            TrdMarket::None => "N/A",
        };
        f.write_str(s)
    }
}

/// Direction of an order or deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrdSide {
    /// Not specified
    #[default]
    None,
    /// Buy
    Buy,
    /// Sell
    Sell,
    /// Short sell
    SellShort,
    /// Buy back a short position
    BuyBack,
}

impl TrdSide {
    /// Returns `true` if this is a buy-side action.
    pub fn is_buy(&self) -> bool {
        matches!(self, TrdSide::Buy | TrdSide::BuyBack)
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Not specified
    None,
    /// Enhanced limit order (HK) / limit order (US)
    #[default]
    Normal,
    /// Market order
    Market,
    /// Absolute limit order (HK)
    AbsoluteLimit,
    /// Auction order (HK)
    Auction,
    /// Auction limit order (HK)
    AuctionLimit,
    /// Special limit order (HK)
    SpecialLimit,
}

/// Current status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created locally, not yet sent
    Unsubmitted,
    /// Queued for submission
    WaitingSubmit,
    /// Being submitted
    Submitting,
    /// Submission failed
    SubmitFailed,
    /// Submission timed out
    Timeout,
    /// Accepted and working
    Submitted,
    /// Partially filled
    FilledPart,
    /// Completely filled
    FilledAll,
    /// Cancelling the unfilled part of a partially filled order
    CancellingPart,
    /// Cancelling the whole order
    CancellingAll,
    /// Partially filled, remainder cancelled
    CancelledPart,
    /// Cancelled with no fills
    CancelledAll,
    /// Rejected by the exchange or broker
    Failed,
    /// Disabled (inactive)
    Disabled,
    /// Deleted
    Deleted,
    /// Unrecognised status (forward-compatibility)
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns `true` if the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::SubmitFailed
                | OrderStatus::Timeout
                | OrderStatus::FilledAll
                | OrderStatus::CancelledPart
                | OrderStatus::CancelledAll
                | OrderStatus::Failed
                | OrderStatus::Deleted
        )
    }

    /// Returns `true` if the order is still working in the market.
    pub fn is_working(&self) -> bool {
        matches!(self, OrderStatus::Submitted | OrderStatus::FilledPart)
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let quoted = serde_json::Value::String(s.trim().to_ascii_uppercase());
        match serde_json::from_value(quoted) {
            Ok(OrderStatus::Unknown) | Err(_) => Err(Error::wrong_param("status_filter_list")),
            Ok(status) => Ok(status),
        }
    }
}

/// Operation applied by a modify-order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifyOrderOp {
    /// Change price and/or quantity
    #[default]
    Normal,
    /// Cancel the order
    Cancel,
    /// Disable the order
    Disable,
    /// Re-enable a disabled order
    Enable,
    /// Delete the order
    Delete,
}

/// Direction of a held position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    /// Long position
    Long,
    /// Short position
    Short,
}
