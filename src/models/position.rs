//! Position models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::PositionSide;

/// A held position, one row of the position table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Stock code without market prefix
    pub code: String,
    /// Display name
    #[serde(default)]
    pub stock_name: String,
    /// Quantity held
    pub qty: Decimal,
    /// Quantity available to sell
    #[serde(default)]
    pub can_sell_qty: Option<Decimal>,
    /// Average cost
    #[serde(default)]
    pub cost_price: Option<Decimal>,
    /// Whether `cost_price` is meaningful
    #[serde(default)]
    pub cost_price_valid: bool,
    /// Market value
    #[serde(default)]
    pub market_val: Option<Decimal>,
    /// Current price
    #[serde(default)]
    pub nominal_price: Option<Decimal>,
    /// Profit/loss ratio, percent
    #[serde(default)]
    pub pl_ratio: Option<Decimal>,
    /// Whether `pl_ratio` is meaningful
    #[serde(default)]
    pub pl_ratio_valid: bool,
    /// Profit/loss amount
    #[serde(default)]
    pub pl_val: Option<Decimal>,
    /// Whether `pl_val` is meaningful
    #[serde(default)]
    pub pl_val_valid: bool,
    /// Quantity bought today
    #[serde(default)]
    pub today_buy_qty: Option<Decimal>,
    /// Value bought today
    #[serde(default)]
    pub today_buy_val: Option<Decimal>,
    /// Profit/loss today
    #[serde(default)]
    pub today_pl_val: Option<Decimal>,
    /// Quantity sold today
    #[serde(default)]
    pub today_sell_qty: Option<Decimal>,
    /// Value sold today
    #[serde(default)]
    pub today_sell_val: Option<Decimal>,
    /// Long or short
    #[serde(default)]
    pub position_side: Option<PositionSide>,
}

impl Position {
    /// Unrealised profit/loss, when the gateway marked it valid.
    pub fn valid_pl(&self) -> Option<Decimal> {
        if self.pl_val_valid {
            self.pl_val
        } else {
            None
        }
    }

    /// Returns `true` for a short position.
    pub fn is_short(&self) -> bool {
        matches!(self.position_side, Some(PositionSide::Short))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_position() {
        let json = r#"{
            "code": "00700",
            "stock_name": "TENCENT",
            "qty": 200,
            "can_sell_qty": 100,
            "cost_price": 350.2,
            "cost_price_valid": true,
            "pl_val": -120.5,
            "pl_val_valid": false,
            "position_side": "LONG"
        }"#;

        let pos: Position = serde_json::from_str(json).unwrap();
        assert_eq!(pos.qty, dec!(200));
        assert_eq!(pos.cost_price, Some(dec!(350.2)));
        assert_eq!(pos.valid_pl(), None);
        assert!(!pos.is_short());
    }
}
