//! Deals service for executed fills.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::client::ContextInner;
use crate::gateway::{DealListQuery, HistoryDealListQuery};
use crate::models::{normalize_code, AccId, Table, TrdEnv, DEAL_COLUMNS};
use crate::Result;

use super::params::{self, DATE_FORMAT};

/// Service for deal queries.
///
/// # Example
///
/// ```no_run
/// use futu_trade_rs::api::HistoryDealsQuery;
/// use futu_trade_rs::models::Deal;
/// use futu_trade_rs::{AccId, TrdEnv};
///
/// # async fn example(ctx: futu_trade_rs::TradeContext) -> futu_trade_rs::Result<()> {
/// let today = ctx.deals().list(None, TrdEnv::Real, AccId::DEFAULT).await?;
/// println!("{} deals today", today.len());
///
/// // Last 90 days for one stock
/// let query = HistoryDealsQuery {
///     code: Some("HK.00700".to_string()),
///     ..Default::default()
/// };
/// for deal in ctx.deals().history(query).await?.records::<Deal>()? {
///     println!("{} {} @ {}", deal.deal_id, deal.qty, deal.price);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DealsService {
    inner: Arc<ContextInner>,
}

/// Query parameters for listing historical deals.
///
/// Missing window bounds are filled in from the context's configured
/// history window.
#[derive(Debug, Clone, Default)]
pub struct HistoryDealsQuery {
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

impl DealsService {
    pub(crate) fn new(inner: Arc<ContextInner>) -> Self {
        Self { inner }
    }

    /// List today's deals, optionally for one stock. Columns: [`DEAL_COLUMNS`].
    pub async fn list(&self, code: Option<&str>, trd_env: TrdEnv, acc_id: AccId) -> Result<Table> {
        self.inner.check_trd_env(trd_env)?;
        let acc_id = self.inner.resolve_acc_id(trd_env, acc_id).await?;

        let rows = self
            .inner
            .query(&DealListQuery {
                code: normalize_code(code.unwrap_or_default()),
                trd_mkt: self.inner.market,
                trd_env,
                acc_id,
            })
            .await?;

        Ok(Table::select(DEAL_COLUMNS, rows))
    }

    /// List historical deals. Columns: [`DEAL_COLUMNS`].
    pub async fn history(&self, query: HistoryDealsQuery) -> Result<Table> {
        self.inner.check_trd_env(query.trd_env)?;
        let (start, end) = params::history_window(
            query.start,
            query.end,
            self.inner.config.history_window_days,
            chrono::Local::now().date_naive(),
        )?;

        let acc_id = self.inner.resolve_acc_id(query.trd_env, query.acc_id).await?;
        let code = normalize_code(query.code.as_deref().unwrap_or_default());

        let rows = self
            .inner
            .query(&HistoryDealListQuery {
                code,
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
                trd_mkt: self.inner.market,
                trd_env: query.trd_env,
                acc_id,
            })
            .await?;

        Ok(Table::select(DEAL_COLUMNS, rows))
    }
}
