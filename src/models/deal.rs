//! Deal (fill) models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TrdSide;
use super::order::parse_gateway_time;
use super::primitives::OrderId;

/// An executed deal, one row of the deal tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    /// Stock code
    pub code: String,
    /// Display name
    #[serde(default)]
    pub stock_name: String,
    /// Deal id
    pub deal_id: String,
    /// Order the deal belongs to
    pub order_id: OrderId,
    /// Filled quantity
    pub qty: Decimal,
    /// Fill price
    pub price: Decimal,
    /// Buy or sell
    pub trd_side: TrdSide,
    /// Execution time, gateway local time
    #[serde(default)]
    pub create_time: String,
    /// Counterparty broker id (HK only)
    #[serde(default)]
    pub counter_broker_id: Option<i64>,
    /// Counterparty broker name (HK only)
    #[serde(default)]
    pub counter_broker_name: Option<String>,
}

impl Deal {
    /// Execution time, if it parses.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_gateway_time(&self.create_time)
    }

    /// Notional value of the fill.
    pub fn value(&self) -> Decimal {
        self.qty * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_deal() {
        let json = r#"{
            "code": "00700",
            "stock_name": "TENCENT",
            "deal_id": "5512",
            "order_id": "4791234",
            "qty": 100,
            "price": 349.8,
            "trd_side": "BUY",
            "create_time": "2018-05-07 10:21:02",
            "counter_broker_id": 5034,
            "counter_broker_name": ""
        }"#;

        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.value(), dec!(34980));
        assert_eq!(deal.counter_broker_id, Some(5034));
        assert!(deal.created_at().is_some());
    }
}
