//! Service modules for the trading operations.
//!
//! Each service covers one area of the trading API and is obtained from
//! a [`TradeContext`](crate::TradeContext).

mod accounts;
mod deals;
mod orders;
mod params;
mod positions;

pub use accounts::AccountsService;
pub use deals::{DealsService, HistoryDealsQuery};
pub use orders::{HistoryOrdersQuery, OrdersQuery, OrdersService};
pub use positions::{PositionsQuery, PositionsService};
