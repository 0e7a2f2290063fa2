//! Orders service for order placement and management.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::client::ContextInner;
use crate::gateway::{HistoryOrderListQuery, ModifyOrder, OrderListQuery, PlaceOrder};
use crate::models::{
    normalize_code, AccId, ModifyOrderOp, NewOrder, OrderAck, OrderId, OrderModification,
    OrderStatus, Row, Table, TrdEnv, GATEWAY_TIME_FORMAT, ORDER_ACK_COLUMNS, ORDER_COLUMNS,
};
use crate::{Error, Result};

use super::params::{self, DATE_FORMAT};

/// Service for order operations.
///
/// # Example
///
/// ```no_run
/// use futu_trade_rs::models::{NewOrderBuilder, OrderModification, TrdSide};
/// use futu_trade_rs::{OrderId, TrdEnv};
/// use rust_decimal_macros::dec;
///
/// # async fn example(ctx: futu_trade_rs::TradeContext) -> futu_trade_rs::Result<()> {
/// ctx.accounts().unlock("123456").await?;
///
/// // Build an order
/// let order = NewOrderBuilder::new()
///     .code("HK.00700")
///     .price(dec!(350.2))
///     .qty(dec!(100))
///     .trd_side(TrdSide::Buy)
///     .build()?;
///
/// // Place it
/// let ack = ctx.orders().place(order).await?;
/// let order_id = ack.get(0, "order_id").and_then(|v| v.as_str()).unwrap_or_default();
///
/// // Reprice it
/// ctx.orders()
///     .change(OrderModification::change(order_id, dec!(349.8), dec!(100)))
///     .await?;
///
/// // And cancel it
/// ctx.orders().cancel(OrderId::new(order_id), TrdEnv::Real, Default::default()).await?;
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ContextInner>,
}

/// Query parameters for listing today's orders.
#[derive(Debug, Clone, Default)]
pub struct OrdersQuery {
    /// Only this order
    pub order_id: Option<OrderId>,
    /// Only these statuses; empty for all
    pub status_filter: Vec<OrderStatus>,
    /// Filter by stock code, with or without market prefix
    pub code: Option<String>,
    /// Orders created at or after this time
    pub start: Option<NaiveDateTime>,
    /// Orders created at or before this time
    pub end: Option<NaiveDateTime>,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account; [`AccId::DEFAULT`] picks one
    pub acc_id: AccId,
}

/// Query parameters for listing historical orders.
///
/// Missing window bounds are filled in from the context's configured
/// history window.
#[derive(Debug, Clone, Default)]
pub struct HistoryOrdersQuery {
    /// Only these statuses; empty for all
    pub status_filter: Vec<OrderStatus>,
    /// Filter by stock code, with or without market prefix
    pub code: Option<String>,
    /// First day of the window
    pub start: Option<NaiveDate>,
    /// Last day of the window
    pub end: Option<NaiveDate>,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account; [`AccId::DEFAULT`] picks one
    pub acc_id: AccId,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ContextInner>) -> Self {
        Self { inner }
    }

    /// List today's orders. Columns: [`ORDER_COLUMNS`].
    pub async fn list(&self, query: OrdersQuery) -> Result<Table> {
        self.inner.check_trd_env(query.trd_env)?;

        let acc_id = self.inner.resolve_acc_id(query.trd_env, query.acc_id).await?;
        let code = normalize_code(query.code.as_deref().unwrap_or_default());
        let status_filter_list = params::status_filter(&query.status_filter)?;

        let rows = self
            .inner
            .query(&OrderListQuery {
                order_id: query
                    .order_id
                    .map(|id| id.as_str().trim().to_string())
                    .unwrap_or_default(),
                status_filter_list,
                code,
                start: format_time(query.start),
                end: format_time(query.end),
                trd_mkt: self.inner.market,
                trd_env: query.trd_env,
                acc_id,
            })
            .await?;

        Ok(Table::select(ORDER_COLUMNS, rows))
    }

    /// Place a new order.
    ///
    /// Returns a one-row table with [`ORDER_ACK_COLUMNS`]. Real-money
    /// orders are refused with [`Error::NotUnlocked`] until the context
    /// has been unlocked, unless that check is disabled in the config.
    pub async fn place(&self, order: NewOrder) -> Result<Table> {
        self.inner.check_trd_env(order.trd_env)?;
        self.inner.check_unlocked(order.trd_env).await?;
        let acc_id = self.inner.resolve_acc_id(order.trd_env, order.acc_id).await?;

        let order_id = self
            .inner
            .query(&PlaceOrder {
                trd_side: order.trd_side,
                order_type: order.order_type,
                price: order.price,
                qty: order.qty,
                code: normalize_code(&order.code),
                adjust_limit: order.adjust_limit,
                trd_mkt: self.inner.market,
                trd_env: order.trd_env,
                acc_id,
                conn_id: self.inner.gateway.sync_conn_id(),
            })
            .await?;

        tracing::info!(order_id = %order_id, trd_env = %order.trd_env, "Order placed");

        let ack = OrderAck {
            trd_env: order.trd_env,
            order_id,
        };
        let row: Row = serde_json::from_value(serde_json::to_value(&ack)?)?;

        Ok(Table::select(ORDER_ACK_COLUMNS, vec![row]))
    }

    /// Modify, cancel, enable, disable or delete an order.
    ///
    /// Returns the gateway's acknowledgement rows with
    /// [`ORDER_ACK_COLUMNS`]. An empty order id is rejected locally.
    pub async fn modify(&self, modification: OrderModification) -> Result<Table> {
        self.inner.check_trd_env(modification.trd_env)?;
        if modification.order_id.is_empty() {
            return Err(Error::wrong_param("order_id"));
        }
        self.inner.check_unlocked(modification.trd_env).await?;
        let acc_id = self
            .inner
            .resolve_acc_id(modification.trd_env, modification.acc_id)
            .await?;

        let rows = self
            .inner
            .query(&ModifyOrder {
                modify_order_op: modification.op,
                order_id: OrderId::new(modification.order_id.as_str().trim()),
                price: modification.price,
                qty: modification.qty,
                adjust_limit: modification.adjust_limit,
                trd_mkt: self.inner.market,
                trd_env: modification.trd_env,
                acc_id,
                conn_id: self.inner.gateway.sync_conn_id(),
            })
            .await?;

        tracing::info!(
            order_id = %modification.order_id,
            op = ?modification.op,
            "Order modified"
        );

        Ok(Table::select(ORDER_ACK_COLUMNS, rows))
    }

    /// Change price and quantity of a working order.
    ///
    /// Same as [`modify`](Self::modify) with the operation forced to
    /// [`ModifyOrderOp::Normal`].
    pub async fn change(&self, modification: OrderModification) -> Result<Table> {
        self.modify(OrderModification {
            op: ModifyOrderOp::Normal,
            ..modification
        })
        .await
    }

    /// Cancel an order.
    pub async fn cancel(&self, order_id: OrderId, trd_env: TrdEnv, acc_id: AccId) -> Result<Table> {
        self.modify(
            OrderModification::cancel(order_id)
                .with_trd_env(trd_env)
                .with_acc_id(acc_id),
        )
        .await
    }

    /// List historical orders. Columns: [`ORDER_COLUMNS`].
    pub async fn history(&self, query: HistoryOrdersQuery) -> Result<Table> {
        self.inner.check_trd_env(query.trd_env)?;
        let (start, end) = params::history_window(
            query.start,
            query.end,
            self.inner.config.history_window_days,
            chrono::Local::now().date_naive(),
        )?;

        let acc_id = self.inner.resolve_acc_id(query.trd_env, query.acc_id).await?;
        let code = normalize_code(query.code.as_deref().unwrap_or_default());
        let status_filter_list = params::status_filter(&query.status_filter)?;

        let rows = self
            .inner
            .query(&HistoryOrderListQuery {
                status_filter_list,
                code,
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
                trd_mkt: self.inner.market,
                trd_env: query.trd_env,
                acc_id,
            })
            .await?;

        Ok(Table::select(ORDER_COLUMNS, rows))
    }
}

fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map(|t| t.format(GATEWAY_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        let t = NaiveDate::from_ymd_opt(2018, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(format_time(Some(t)), "2018-06-01 09:30:00");
        assert_eq!(format_time(None), "");
    }
}
