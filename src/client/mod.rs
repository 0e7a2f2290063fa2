//! Trade context and its configuration.
//!
//! [`TradeContext`] is the entry point for trading against one market.
//! It owns the account cache, the unlock credential and the account push
//! subscription, and hands out one service per area of the trading API.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use futu_trade_rs::{ContextConfig, ReplayConfig, TradeContext, TrdMarket};
//! use futu_trade_rs::gateway::TradeGateway;
//!
//! # async fn example(gateway: Arc<dyn TradeGateway>) -> futu_trade_rs::Result<()> {
//! let config = ContextConfig::default().with_unlock_replay(ReplayConfig::disabled());
//! let ctx = TradeContext::with_config(TrdMarket::Us, gateway, config);
//!
//! let accounts = ctx.accounts().list().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod context;

pub use config::{ContextConfig, ReplayConfig};
pub use context::{SubscriptionState, TradeContext};
pub(crate) use context::{ContextInner, Password};
