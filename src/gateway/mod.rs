//! The seam between the trade context and the wire transport.
//!
//! Framing, protocol encoding, and socket reconnection live behind
//! [`TradeGateway`]. The trade context only ever hands the gateway a
//! protocol id and a JSON keyword bundle, and reads a JSON reply back.
//!
//! Each request the context can make is a [`TradeQuery`]: a serializable
//! keyword bundle with its protocol id and the shape of its reply.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::Result;

mod queries;

pub use queries::*;

/// Protocol ids of the trade requests and pushes.
pub mod proto {
    /// List the login user's accounts
    pub const GET_ACC_LIST: u32 = 2001;
    /// Unlock or lock trading
    pub const UNLOCK_TRADE: u32 = 2005;
    /// Subscribe to account pushes
    pub const SUB_ACC_PUSH: u32 = 2008;
    /// Account funds
    pub const GET_FUNDS: u32 = 2101;
    /// Positions
    pub const GET_POSITION_LIST: u32 = 2102;
    /// Today's orders
    pub const GET_ORDER_LIST: u32 = 2201;
    /// Place an order
    pub const PLACE_ORDER: u32 = 2202;
    /// Modify, cancel, enable, disable or delete an order
    pub const MODIFY_ORDER: u32 = 2205;
    /// Order update push
    pub const UPDATE_ORDER: u32 = 2208;
    /// Today's deals
    pub const GET_ORDER_FILL_LIST: u32 = 2211;
    /// Deal push
    pub const UPDATE_ORDER_FILL: u32 = 2218;
    /// Historical orders
    pub const GET_HISTORY_ORDER_LIST: u32 = 2221;
    /// Historical deals
    pub const GET_HISTORY_ORDER_FILL_LIST: u32 = 2222;
}

/// A request the trade context can send, with the shape of its reply.
///
/// Packing is `serde_json::to_value` on the bundle; unpacking is
/// `serde_json::from_value` into [`TradeQuery::Response`].
pub trait TradeQuery: Serialize {
    /// Protocol id of the request.
    const PROTO_ID: u32;

    /// Decoded reply.
    type Response: DeserializeOwned;
}

/// Transport to the trading gateway.
///
/// Implementations own the socket(s), the encoding of keyword bundles into
/// frames, and the mapping of gateway failures onto
/// [`Error::Gateway`](crate::Error::Gateway). A failed reply must be
/// reported with the gateway's own code and message untouched.
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use futu_trade_rs::gateway::TradeGateway;
/// use serde_json::Value;
///
/// struct Loopback;
///
/// #[async_trait]
/// impl TradeGateway for Loopback {
///     async fn request(&self, _proto_id: u32, body: Value) -> futu_trade_rs::Result<Value> {
///         Ok(body)
///     }
///
///     async fn send_async(&self, _proto_id: u32, _body: Value) -> futu_trade_rs::Result<()> {
///         Ok(())
///     }
///
///     fn login_user_id(&self) -> u64 {
///         1
///     }
///
///     fn sync_conn_id(&self) -> u64 {
///         1
///     }
/// }
/// ```
#[async_trait]
pub trait TradeGateway: Send + Sync {
    /// Send a request and wait for its reply.
    async fn request(&self, proto_id: u32, body: Value) -> Result<Value>;

    /// Send a request on the push connection without waiting for a reply.
    ///
    /// Any reply arrives later through
    /// [`TradeContext::on_push`](crate::TradeContext::on_push).
    async fn send_async(&self, proto_id: u32, body: Value) -> Result<()>;

    /// Id of the logged-in user.
    fn login_user_id(&self) -> u64;

    /// Id of the synchronous connection, echoed in order requests.
    fn sync_conn_id(&self) -> u64;

    /// Release the transport.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Pack a query into the keyword bundle sent on the wire.
pub(crate) fn pack<Q: TradeQuery>(query: &Q) -> Result<Value> {
    Ok(serde_json::to_value(query)?)
}

/// Unpack a gateway reply.
pub(crate) fn unpack<Q: TradeQuery>(reply: Value) -> Result<Q::Response> {
    Ok(serde_json::from_value(reply)?)
}
