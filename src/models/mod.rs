//! Data models for the trade context.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Core types like `AccId`, `OrderId` and stock code handling
//! - [`enums`] - Environment, market, side, order type and status enums
//! - [`account`] - Account list and funds models
//! - [`position`] - Position rows
//! - [`order`] - Order rows and order placement/modification inputs
//! - [`deal`] - Deal rows
//! - [`table`] - The fixed-column [`Table`] every query returns

pub mod primitives;
pub mod enums;
pub mod account;
pub mod position;
pub mod order;
pub mod deal;
pub mod table;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use position::*;
pub use order::*;
pub use deal::*;
pub use table::*;
