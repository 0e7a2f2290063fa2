//! Primitive types and newtypes for type-safe gateway interactions.
//!
//! This module provides strongly-typed wrappers around identifiers so an
//! account id can't be passed where an order id is expected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A raw row as returned by the gateway: a flat map of broker-defined fields.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A trading account id.
///
/// The id `0` is reserved and means "use the default account for the
/// requested environment".
///
/// # Example
///
/// ```
/// use futu_trade_rs::AccId;
///
/// assert!(AccId::DEFAULT.is_default());
/// assert!(!AccId::new(281756457888247915).is_default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccId(u64);

impl AccId {
    /// The "pick one for me" account id.
    pub const DEFAULT: AccId = AccId(0);

    /// Create an account id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric id.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the default placeholder.
    pub const fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AccId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A strongly-typed order ID.
///
/// The gateway hands order ids out as decimal strings, though some
/// replies carry them as bare integers; both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => OrderId(s),
            Raw::Number(n) => OrderId(n.to_string()),
        })
    }
}

impl OrderId {
    /// Create a new order ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no id was given.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Market prefixes recognised in qualified stock codes such as `HK.00700`.
const CODE_MARKETS: &[&str] = &["HK", "US", "SH", "SZ", "HK_FUTURE"];

/// Strip a known market prefix from a stock code.
///
/// `HK.00700` becomes `00700`. Codes without a recognised prefix, and the
/// empty code, are returned unchanged.
///
/// # Example
///
/// ```
/// use futu_trade_rs::models::normalize_code;
///
/// assert_eq!(normalize_code("HK.00700"), "00700");
/// assert_eq!(normalize_code("US.AAPL"), "AAPL");
/// assert_eq!(normalize_code("00700"), "00700");
/// assert_eq!(normalize_code(""), "");
/// ```
pub fn normalize_code(code: &str) -> String {
    let code = code.trim();
    match code.split_once('.') {
        Some((market, symbol)) if CODE_MARKETS.contains(&market) && !symbol.is_empty() => {
            symbol.to_string()
        }
        _ => code.to_string(),
    }
}
