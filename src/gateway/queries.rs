//! Keyword bundles for every trade request.
//!
//! Field names are the gateway's keyword names; they are what the
//! transport packs into protocol frames.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::{proto, TradeQuery};
use crate::models::{
    AccId, AccListEntry, ModifyOrderOp, OrderId, OrderStatus, OrderType, Row, TrdEnv, TrdMarket,
    TrdSide,
};

/// List every account of the login user.
#[derive(Debug, Clone, Serialize)]
pub struct GetAccList {
    /// Login user id
    pub user_id: u64,
}

impl TradeQuery for GetAccList {
    const PROTO_ID: u32 = proto::GET_ACC_LIST;
    type Response = Vec<AccListEntry>;
}

/// Unlock (or lock) real-money trading.
#[derive(Clone, Serialize)]
pub struct UnlockTrade {
    /// `true` to unlock, `false` to lock
    pub is_unlock: bool,
    /// Lower-case hex MD5 of the trading password
    pub password_md5: String,
}

impl fmt::Debug for UnlockTrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnlockTrade")
            .field("is_unlock", &self.is_unlock)
            .field("password_md5", &"[REDACTED]")
            .finish()
    }
}

impl TradeQuery for UnlockTrade {
    const PROTO_ID: u32 = proto::UNLOCK_TRADE;
    type Response = Value;
}

/// Ask for account pushes on the async connection.
#[derive(Debug, Clone, Serialize)]
pub struct SubAccPush {
    /// Accounts to receive pushes for
    pub acc_id_list: Vec<AccId>,
}

impl TradeQuery for SubAccPush {
    const PROTO_ID: u32 = proto::SUB_ACC_PUSH;
    type Response = Value;
}

/// Account funds.
#[derive(Debug, Clone, Serialize)]
pub struct AccInfoQuery {
    /// Account
    pub acc_id: AccId,
    /// Environment
    pub trd_env: TrdEnv,
    /// Market
    pub trd_market: TrdMarket,
}

impl TradeQuery for AccInfoQuery {
    const PROTO_ID: u32 = proto::GET_FUNDS;
    type Response = Vec<Row>;
}

/// Positions, optionally filtered by code and P/L ratio band.
#[derive(Debug, Clone, Serialize)]
pub struct PositionListQuery {
    /// Stock code, empty for all
    pub code: String,
    /// Lower P/L ratio bound, percent
    #[serde(with = "rust_decimal::serde::float_option")]
    pub pl_ratio_min: Option<Decimal>,
    /// Upper P/L ratio bound, percent
    #[serde(with = "rust_decimal::serde::float_option")]
    pub pl_ratio_max: Option<Decimal>,
    /// Market
    pub trd_mkt: TrdMarket,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account
    pub acc_id: AccId,
}

impl TradeQuery for PositionListQuery {
    const PROTO_ID: u32 = proto::GET_POSITION_LIST;
    type Response = Vec<Row>;
}

/// Today's orders.
#[derive(Debug, Clone, Serialize)]
pub struct OrderListQuery {
    /// Single order id, empty for all
    pub order_id: String,
    /// Statuses to keep, empty for all
    pub status_filter_list: Vec<OrderStatus>,
    /// Stock code, empty for all
    pub code: String,
    /// Lower time bound, empty for none
    pub start: String,
    /// Upper time bound, empty for none
    pub end: String,
    /// Market
    pub trd_mkt: TrdMarket,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account
    pub acc_id: AccId,
}

impl TradeQuery for OrderListQuery {
    const PROTO_ID: u32 = proto::GET_ORDER_LIST;
    type Response = Vec<Row>;
}

/// Place an order.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrder {
    /// Buy or sell
    pub trd_side: TrdSide,
    /// Order type
    pub order_type: OrderType,
    /// Limit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Quantity
    #[serde(with = "rust_decimal::serde::float")]
    pub qty: Decimal,
    /// Stock code
    pub code: String,
    /// Price adjustment band
    #[serde(with = "rust_decimal::serde::float")]
    pub adjust_limit: Decimal,
    /// Market
    pub trd_mkt: TrdMarket,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account
    pub acc_id: AccId,
    /// Synchronous connection id
    pub conn_id: u64,
}

impl TradeQuery for PlaceOrder {
    const PROTO_ID: u32 = proto::PLACE_ORDER;
    type Response = OrderId;
}

/// Modify, cancel, enable, disable or delete an order.
#[derive(Debug, Clone, Serialize)]
pub struct ModifyOrder {
    /// Operation
    pub modify_order_op: ModifyOrderOp,
    /// Order to act on
    pub order_id: OrderId,
    /// New price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// New quantity
    #[serde(with = "rust_decimal::serde::float")]
    pub qty: Decimal,
    /// Price adjustment band
    #[serde(with = "rust_decimal::serde::float")]
    pub adjust_limit: Decimal,
    /// Market
    pub trd_mkt: TrdMarket,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account
    pub acc_id: AccId,
    /// Synchronous connection id
    pub conn_id: u64,
}

impl TradeQuery for ModifyOrder {
    const PROTO_ID: u32 = proto::MODIFY_ORDER;
    type Response = Vec<Row>;
}

/// Today's deals.
#[derive(Debug, Clone, Serialize)]
pub struct DealListQuery {
    /// Stock code, empty for all
    pub code: String,
    /// Market
    pub trd_mkt: TrdMarket,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account
    pub acc_id: AccId,
}

impl TradeQuery for DealListQuery {
    const PROTO_ID: u32 = proto::GET_ORDER_FILL_LIST;
    type Response = Vec<Row>;
}

/// Historical orders within a date window.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryOrderListQuery {
    /// Statuses to keep, empty for all
    pub status_filter_list: Vec<OrderStatus>,
    /// Stock code, empty for all
    pub code: String,
    /// First day, `YYYY-MM-DD`
    pub start: String,
    /// Last day, `YYYY-MM-DD`
    pub end: String,
    /// Market
    pub trd_mkt: TrdMarket,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account
    pub acc_id: AccId,
}

impl TradeQuery for HistoryOrderListQuery {
    const PROTO_ID: u32 = proto::GET_HISTORY_ORDER_LIST;
    type Response = Vec<Row>;
}

/// Historical deals within a date window.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryDealListQuery {
    /// Stock code, empty for all
    pub code: String,
    /// First day, `YYYY-MM-DD`
    pub start: String,
    /// Last day, `YYYY-MM-DD`
    pub end: String,
    /// Market
    pub trd_mkt: TrdMarket,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account
    pub acc_id: AccId,
}

impl TradeQuery for HistoryDealListQuery {
    const PROTO_ID: u32 = proto::GET_HISTORY_ORDER_FILL_LIST;
    type Response = Vec<Row>;
}
