//! # futu-trade-rs
//!
//! A validated trade context for the Futu OpenD trading gateway.
//!
//! A [`TradeContext`] is bound to one market. Each trading operation
//! validates its parameters locally, resolves which account to trade in,
//! forwards a keyword bundle to the gateway, and hands the reply back as a
//! fixed-column [`Table`](models::Table).
//!
//! ## Features
//!
//! - **Accounts**: account list, trade unlock/lock, account funds
//! - **Positions**: filtered by stock code and profit/loss ratio band
//! - **Orders**: today's and historical orders, place, modify, change, cancel
//! - **Deals**: today's and historical fills
//! - **Push**: decoded order and deal updates over a broadcast channel
//! - **Reconnection**: the unlock is replayed after the transport reconnects
//!
//! The wire transport is not part of this crate; it is plugged in through
//! the [`TradeGateway`](gateway::TradeGateway) trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use futu_trade_rs::{AccId, TradeContext, TrdEnv};
//! use futu_trade_rs::models::{NewOrderBuilder, TrdSide};
//! use futu_trade_rs::gateway::TradeGateway;
//! use rust_decimal_macros::dec;
//!
//! # async fn example(gateway: Arc<dyn TradeGateway>) -> futu_trade_rs::Result<()> {
//! let ctx = TradeContext::hk(gateway);
//!
//! // Accounts trading in Hong Kong
//! let accounts = ctx.accounts().list().await?;
//! println!("Found {} accounts", accounts.len());
//!
//! // Real-money trading must be unlocked first
//! ctx.accounts().unlock("123456").await?;
//!
//! let order = NewOrderBuilder::new()
//!     .code("HK.00700")
//!     .price(dec!(350.2))
//!     .qty(dec!(100))
//!     .trd_side(TrdSide::Buy)
//!     .trd_env(TrdEnv::Real)
//!     .acc_id(AccId::DEFAULT)
//!     .build()?;
//!
//! let ack = ctx.orders().place(order).await?;
//! println!("Order placed: {:?}", ack.get(0, "order_id"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Push Notifications
//!
//! ```rust,no_run
//! use futu_trade_rs::push::TradeNotification;
//!
//! # async fn example(ctx: futu_trade_rs::TradeContext) {
//! let mut rx = ctx.notifications();
//! while let Ok(notification) = rx.recv().await {
//!     if let TradeNotification::Order(order) = notification {
//!         println!("{}: {:?}", order.order_id, order.order_status);
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod gateway;
pub mod models;
pub mod push;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{normalize_code, AccId, OrderId, Table, TrdEnv, TrdMarket};
pub use client::{ContextConfig, ReplayConfig, SubscriptionState, TradeContext};

/// Prelude module for convenient imports.
///
/// ```rust
/// use futu_trade_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccId, OrderId, Row, Table,
        // Enums
        TrdEnv, TrdMarket, TrdSide, OrderType, OrderStatus, ModifyOrderOp, PositionSide,
        // Rows
        AccountRecord, AccountInfo, Position, Order, Deal, OrderAck,
        // Inputs
        NewOrder, NewOrderBuilder, OrderModification,
    };
    pub use crate::api::{HistoryDealsQuery, HistoryOrdersQuery, OrdersQuery, PositionsQuery};
    pub use crate::client::{ContextConfig, ReplayConfig, TradeContext};
    pub use crate::gateway::TradeGateway;
    pub use crate::push::TradeNotification;
}
