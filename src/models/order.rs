//! Order models for placing and managing trades.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::*;
use super::primitives::{normalize_code, AccId, OrderId};

/// Timestamp layout used by the gateway for order and deal times.
pub const GATEWAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a gateway timestamp, tolerating a trailing fractional part.
pub(crate) fn parse_gateway_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, GATEWAY_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// A new order to be submitted.
///
/// Use [`NewOrderBuilder`] to construct orders with validation.
///
/// # Example
///
/// ```
/// use futu_trade_rs::models::{NewOrderBuilder, TrdSide, OrderType, TrdEnv};
/// use rust_decimal_macros::dec;
///
/// let order = NewOrderBuilder::new()
///     .code("HK.00700")
///     .price(dec!(350.00))
///     .qty(dec!(100))
///     .trd_side(TrdSide::Buy)
///     .order_type(OrderType::Normal)
///     .trd_env(TrdEnv::Simulate)
///     .build()
///     .unwrap();
///
/// assert_eq!(order.code, "00700");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Limit price
    pub price: Decimal,
    /// Quantity
    pub qty: Decimal,
    /// Stock code, market prefix already stripped
    pub code: String,
    /// Buy or sell
    pub trd_side: TrdSide,
    /// Order type
    pub order_type: OrderType,
    /// Price adjustment band, as a fraction (e.g. `0.01` for 1%)
    pub adjust_limit: Decimal,
    /// Environment to trade in
    pub trd_env: TrdEnv,
    /// Account to trade in; [`AccId::DEFAULT`] picks one
    pub acc_id: AccId,
}

/// Builder for creating new orders with validation.
#[derive(Debug, Default, Clone)]
pub struct NewOrderBuilder {
    price: Option<Decimal>,
    qty: Option<Decimal>,
    code: Option<String>,
    trd_side: TrdSide,
    order_type: OrderType,
    adjust_limit: Decimal,
    trd_env: TrdEnv,
    acc_id: AccId,
}

impl NewOrderBuilder {
    /// Create a new order builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the quantity.
    pub fn qty(mut self, qty: Decimal) -> Self {
        self.qty = Some(qty);
        self
    }

    /// Set the stock code. A market prefix such as `HK.` is accepted.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the trade side.
    pub fn trd_side(mut self, side: TrdSide) -> Self {
        self.trd_side = side;
        self
    }

    /// Set the order type.
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Set the price adjustment band.
    pub fn adjust_limit(mut self, adjust_limit: Decimal) -> Self {
        self.adjust_limit = adjust_limit;
        self
    }

    /// Set the trading environment.
    pub fn trd_env(mut self, env: TrdEnv) -> Self {
        self.trd_env = env;
        self
    }

    /// Set the account.
    pub fn acc_id(mut self, acc_id: AccId) -> Self {
        self.acc_id = acc_id;
        self
    }

    /// Build the order, validating all fields.
    pub fn build(self) -> crate::Result<NewOrder> {
        let code = self
            .code
            .as_deref()
            .map(normalize_code)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| crate::Error::wrong_param("code"))?;

        let qty = self
            .qty
            .filter(|q| *q > Decimal::ZERO)
            .ok_or_else(|| crate::Error::wrong_param("qty"))?;

        let price = self.price.unwrap_or(Decimal::ZERO);
        if price < Decimal::ZERO {
            return Err(crate::Error::wrong_param("price"));
        }

        if self.trd_side == TrdSide::None {
            return Err(crate::Error::wrong_param("trd_side"));
        }

        Ok(NewOrder {
            price,
            qty,
            code,
            trd_side: self.trd_side,
            order_type: self.order_type,
            adjust_limit: self.adjust_limit,
            trd_env: self.trd_env,
            acc_id: self.acc_id,
        })
    }
}

/// A change to an existing order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderModification {
    /// What to do with the order
    pub op: ModifyOrderOp,
    /// Order to modify
    pub order_id: OrderId,
    /// New quantity (ignored for cancel/enable/disable/delete)
    pub qty: Decimal,
    /// New price (ignored for cancel/enable/disable/delete)
    pub price: Decimal,
    /// Price adjustment band
    pub adjust_limit: Decimal,
    /// Environment of the order
    pub trd_env: TrdEnv,
    /// Account of the order; [`AccId::DEFAULT`] picks one
    pub acc_id: AccId,
}

impl OrderModification {
    /// A modification with zero quantity and price, in the real environment
    /// of the default account.
    pub fn new(op: ModifyOrderOp, order_id: impl Into<OrderId>) -> Self {
        Self {
            op,
            order_id: order_id.into(),
            qty: Decimal::ZERO,
            price: Decimal::ZERO,
            adjust_limit: Decimal::ZERO,
            trd_env: TrdEnv::default(),
            acc_id: AccId::DEFAULT,
        }
    }

    /// Change price and quantity of a working order.
    pub fn change(order_id: impl Into<OrderId>, price: Decimal, qty: Decimal) -> Self {
        Self {
            price,
            qty,
            ..Self::new(ModifyOrderOp::Normal, order_id)
        }
    }

    /// Cancel an order.
    pub fn cancel(order_id: impl Into<OrderId>) -> Self {
        Self::new(ModifyOrderOp::Cancel, order_id)
    }

    /// Set the price adjustment band.
    pub fn with_adjust_limit(mut self, adjust_limit: Decimal) -> Self {
        self.adjust_limit = adjust_limit;
        self
    }

    /// Set the trading environment.
    pub fn with_trd_env(mut self, env: TrdEnv) -> Self {
        self.trd_env = env;
        self
    }

    /// Set the account.
    pub fn with_acc_id(mut self, acc_id: AccId) -> Self {
        self.acc_id = acc_id;
        self
    }
}

/// An order as reported by the order list queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Stock code
    pub code: String,
    /// Display name
    #[serde(default)]
    pub stock_name: String,
    /// Buy or sell
    pub trd_side: TrdSide,
    /// Order type
    pub order_type: OrderType,
    /// Current status
    pub order_status: OrderStatus,
    /// Order id
    pub order_id: OrderId,
    /// Ordered quantity
    pub qty: Decimal,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Creation time, gateway local time
    #[serde(default)]
    pub create_time: String,
    /// Last update time, gateway local time
    #[serde(default)]
    pub updated_time: String,
    /// Quantity filled so far
    #[serde(default)]
    pub dealt_qty: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub dealt_avg_price: Option<Decimal>,
    /// Last error reported for this order
    #[serde(default)]
    pub last_err_msg: String,
}

impl Order {
    /// Creation time, if it parses.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_gateway_time(&self.create_time)
    }

    /// Last update time, if it parses.
    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        parse_gateway_time(&self.updated_time)
    }

    /// Returns `true` if the order is still working.
    pub fn is_working(&self) -> bool {
        self.order_status.is_working()
    }

    /// Calculate the fill percentage.
    pub fn fill_percentage(&self) -> Option<Decimal> {
        match self.dealt_qty {
            Some(filled) if self.qty > Decimal::ZERO => {
                Some((filled / self.qty) * Decimal::from(100))
            }
            _ => None,
        }
    }
}

/// Acknowledgement of a placed or modified order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Environment the order lives in
    pub trd_env: TrdEnv,
    /// Order id
    pub order_id: OrderId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_builder() -> NewOrderBuilder {
        NewOrderBuilder::new()
            .code("US.AAPL")
            .price(dec!(190.5))
            .qty(dec!(10))
            .trd_side(TrdSide::Buy)
    }

    #[test]
    fn test_order_builder_valid() {
        let order = valid_builder().acc_id(AccId::new(1001)).build().unwrap();

        assert_eq!(order.code, "AAPL");
        assert_eq!(order.order_type, OrderType::Normal);
        assert_eq!(order.trd_env, TrdEnv::Real);
        assert_eq!(order.acc_id, AccId::new(1001));
    }

    #[test]
    fn test_order_builder_missing_side() {
        let err = valid_builder().trd_side(TrdSide::None).build().unwrap_err();
        assert!(err.to_string().contains("trd_side"));
    }

    #[test]
    fn test_order_builder_rejects_bad_qty() {
        assert!(valid_builder().qty(dec!(0)).build().is_err());
        assert!(valid_builder().qty(dec!(-5)).build().is_err());
    }

    #[test]
    fn test_order_builder_requires_code() {
        assert!(NewOrderBuilder::new()
            .price(dec!(1))
            .qty(dec!(1))
            .trd_side(TrdSide::Sell)
            .build()
            .is_err());
    }

    #[test]
    fn test_market_order_needs_no_price() {
        let order = NewOrderBuilder::new()
            .code("HK.00700")
            .qty(dec!(100))
            .trd_side(TrdSide::Sell)
            .order_type(OrderType::Market)
            .build()
            .unwrap();
        assert_eq!(order.price, Decimal::ZERO);

        assert!(valid_builder().price(dec!(-1)).build().is_err());
    }

    #[test]
    fn test_modification_helpers() {
        let change = OrderModification::change("8851", dec!(351), dec!(200));
        assert_eq!(change.op, ModifyOrderOp::Normal);
        assert_eq!(change.qty, dec!(200));

        let cancel = OrderModification::cancel("8851").with_trd_env(TrdEnv::Simulate);
        assert_eq!(cancel.op, ModifyOrderOp::Cancel);
        assert_eq!(cancel.trd_env, TrdEnv::Simulate);
    }

    #[test]
    fn test_deserialize_order() {
        let json = r#"{
            "code": "00700",
            "stock_name": "TENCENT",
            "trd_side": "BUY",
            "order_type": "NORMAL",
            "order_status": "FILLED_PART",
            "order_id": "4791234",
            "qty": 400,
            "price": 350.0,
            "create_time": "2018-05-07 10:20:30",
            "updated_time": "2018-05-07 10:21:02.123",
            "dealt_qty": 100,
            "dealt_avg_price": 349.8,
            "last_err_msg": ""
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id.as_str(), "4791234");
        assert!(order.is_working());
        assert_eq!(order.fill_percentage(), Some(dec!(25)));
        assert!(order.created_at().is_some());
        assert!(order.updated_at().is_some());
    }
}
