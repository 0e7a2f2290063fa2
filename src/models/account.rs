//! Account and funds models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{TrdEnv, TrdMarket};
use super::primitives::AccId;

/// An account as reported by the account-list query, before filtering by
/// market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccListEntry {
    /// Account id
    pub acc_id: AccId,
    /// Environment the account trades in
    pub trd_env: TrdEnv,
    /// Markets the account is authorised for
    #[serde(rename = "trdMarket_list", default)]
    pub trd_market_list: Vec<TrdMarket>,
}

impl AccListEntry {
    /// Returns `true` if the account may trade in `market`.
    pub fn trades_in(&self, market: TrdMarket) -> bool {
        self.trd_market_list.contains(&market)
    }
}

/// A cached account record: one row of the account list table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account id
    pub acc_id: AccId,
    /// Environment the account trades in
    pub trd_env: TrdEnv,
}

impl From<&AccListEntry> for AccountRecord {
    fn from(entry: &AccListEntry) -> Self {
        Self {
            acc_id: entry.acc_id,
            trd_env: entry.trd_env,
        }
    }
}

/// Account funds, one row of the account info table.
///
/// Field names on the wire are the gateway's pinyin abbreviations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Buying power
    #[serde(rename = "Power", default)]
    pub power: Option<Decimal>,
    /// Total net assets
    #[serde(rename = "ZCJZ", default)]
    pub total_assets: Option<Decimal>,
    /// Market value of securities held
    #[serde(rename = "ZQSZ", default)]
    pub market_value: Option<Decimal>,
    /// Cash balance
    #[serde(rename = "XJJY", default)]
    pub cash: Option<Decimal>,
    /// Withdrawable cash
    #[serde(rename = "KQXJ", default)]
    pub avl_withdrawal_cash: Option<Decimal>,
    /// Frozen cash
    #[serde(rename = "DJZJ", default)]
    pub frozen_cash: Option<Decimal>,
}
