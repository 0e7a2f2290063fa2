//! Push notifications from the trading gateway.
//!
//! The transport forwards every push frame to
//! [`TradeContext::on_push`](crate::TradeContext::on_push). Order and deal
//! updates are decoded and fanned out to every receiver obtained from
//! [`TradeContext::notifications`](crate::TradeContext::notifications).
//!
//! ```no_run
//! # async fn example(ctx: futu_trade_rs::TradeContext) {
//! use futu_trade_rs::push::TradeNotification;
//!
//! let mut rx = ctx.notifications();
//! while let Ok(notification) = rx.recv().await {
//!     match notification {
//!         TradeNotification::Order(order) => println!("{} -> {:?}", order.order_id, order.order_status),
//!         TradeNotification::Deal(deal) => println!("filled {} @ {}", deal.qty, deal.price),
//!         _ => {}
//!     }
//! }
//! # }
//! ```

use serde_json::Value;

use crate::gateway::proto;
use crate::models::{Deal, Order};

/// A decoded push notification.
#[derive(Debug, Clone)]
pub enum TradeNotification {
    /// Order status update
    Order(Order),
    /// New deal on one of the subscribed accounts
    Deal(Deal),
    /// Failed to decode a recognised push
    ParseError {
        /// Protocol id of the push
        proto_id: u32,
        /// Error message describing what went wrong
        error: String,
        /// Raw payload that failed to parse
        raw_data: Value,
    },
    /// Push with a protocol id this crate does not decode
    Unknown {
        /// Protocol id of the push
        proto_id: u32,
        /// Raw payload
        body: Value,
    },
}

impl TradeNotification {
    /// Decode a push payload.
    ///
    /// Order and deal pushes may carry the row directly or wrapped in an
    /// `"order"` / `"deal"` field.
    pub fn decode(proto_id: u32, body: Value) -> Self {
        match proto_id {
            proto::UPDATE_ORDER => Self::decode_row(proto_id, body, "order", TradeNotification::Order),
            proto::UPDATE_ORDER_FILL => Self::decode_row(proto_id, body, "deal", TradeNotification::Deal),
            _ => TradeNotification::Unknown { proto_id, body },
        }
    }

    fn decode_row<T, F>(proto_id: u32, body: Value, key: &str, wrap: F) -> Self
    where
        T: serde::de::DeserializeOwned,
        F: FnOnce(T) -> Self,
    {
        let row = match body.get(key) {
            Some(inner) => inner.clone(),
            None => body.clone(),
        };

        match serde_json::from_value(row) {
            Ok(value) => wrap(value),
            Err(e) => TradeNotification::ParseError {
                proto_id,
                error: e.to_string(),
                raw_data: body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_row() -> Value {
        json!({
            "code": "00700",
            "stock_name": "TENCENT",
            "trd_side": "SELL",
            "order_type": "NORMAL",
            "order_status": "SUBMITTED",
            "order_id": 8851,
            "qty": 100,
            "price": 352.4
        })
    }

    #[test]
    fn test_decode_order_push() {
        match TradeNotification::decode(proto::UPDATE_ORDER, order_row()) {
            TradeNotification::Order(order) => assert_eq!(order.order_id.as_str(), "8851"),
            other => panic!("Expected order notification, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_wrapped_order_push() {
        let body = json!({ "order": order_row() });
        assert!(matches!(
            TradeNotification::decode(proto::UPDATE_ORDER, body),
            TradeNotification::Order(_)
        ));
    }

    #[test]
    fn test_decode_bad_deal_push() {
        let body = json!({ "deal": { "code": "00700" } });
        match TradeNotification::decode(proto::UPDATE_ORDER_FILL, body) {
            TradeNotification::ParseError { proto_id, .. } => {
                assert_eq!(proto_id, proto::UPDATE_ORDER_FILL)
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_push() {
        assert!(matches!(
            TradeNotification::decode(9999, json!({})),
            TradeNotification::Unknown { proto_id: 9999, .. }
        ));
    }
}
