//! Positions service.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::client::ContextInner;
use crate::gateway::PositionListQuery;
use crate::models::{normalize_code, AccId, Table, TrdEnv, POSITION_COLUMNS};
use crate::Result;

/// Service for position queries.
///
/// # Example
///
/// ```no_run
/// use futu_trade_rs::api::PositionsQuery;
/// use futu_trade_rs::models::Position;
/// use rust_decimal_macros::dec;
///
/// # async fn example(ctx: futu_trade_rs::TradeContext) -> futu_trade_rs::Result<()> {
/// let query = PositionsQuery {
///     pl_ratio_max: Some(dec!(-5)),
///     ..Default::default()
/// };
///
/// let losers = ctx.positions().list(query).await?;
/// for position in losers.records::<Position>()? {
///     println!("{} {:?}", position.code, position.pl_ratio);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PositionsService {
    inner: Arc<ContextInner>,
}

/// Query parameters for listing positions.
#[derive(Debug, Clone, Default)]
pub struct PositionsQuery {
    /// Filter by stock code, with or without market prefix
    pub code: Option<String>,
    /// Lower P/L ratio bound, percent
    pub pl_ratio_min: Option<Decimal>,
    /// Upper P/L ratio bound, percent
    pub pl_ratio_max: Option<Decimal>,
    /// Environment
    pub trd_env: TrdEnv,
    /// Account; [`AccId::DEFAULT`] picks one
    pub acc_id: AccId,
}

impl PositionsService {
    pub(crate) fn new(inner: Arc<ContextInner>) -> Self {
        Self { inner }
    }

    /// List positions. Columns: [`POSITION_COLUMNS`].
    pub async fn list(&self, query: PositionsQuery) -> Result<Table> {
        self.inner.check_trd_env(query.trd_env)?;
        let acc_id = self.inner.resolve_acc_id(query.trd_env, query.acc_id).await?;

        let rows = self
            .inner
            .query(&PositionListQuery {
                code: normalize_code(query.code.as_deref().unwrap_or_default()),
                pl_ratio_min: query.pl_ratio_min,
                pl_ratio_max: query.pl_ratio_max,
                trd_mkt: self.inner.market,
                trd_env: query.trd_env,
                acc_id,
            })
            .await?;

        Ok(Table::select(POSITION_COLUMNS, rows))
    }
}
