//! Accounts service for account listing, unlocking and funds.

use std::sync::Arc;

use secrecy::SecretString;

use crate::client::{ContextInner, Password};
use crate::gateway::AccInfoQuery;
use crate::models::{AccId, AccountRecord, Row, Table, TrdEnv, ACC_INFO_COLUMNS, ACC_LIST_COLUMNS};
use crate::Result;

/// Service for account-related operations.
///
/// # Example
///
/// ```no_run
/// use futu_trade_rs::{AccId, TrdEnv};
///
/// # async fn example(ctx: futu_trade_rs::TradeContext) -> futu_trade_rs::Result<()> {
/// // Accounts trading in this context's market
/// let accounts = ctx.accounts().list().await?;
/// for acc_id in accounts.column("acc_id").unwrap_or_default() {
///     println!("Account: {}", acc_id);
/// }
///
/// // Real-money trading needs an unlock first
/// ctx.accounts().unlock("123456").await?;
///
/// let funds = ctx.accounts().info(TrdEnv::Real, AccId::DEFAULT).await?;
/// println!("Buying power: {:?}", funds.get(0, "Power"));
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ContextInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ContextInner>) -> Self {
        Self { inner }
    }

    /// List the login user's accounts that trade in this context's market.
    ///
    /// Always queries the gateway and replaces the cached account list.
    /// Columns: [`ACC_LIST_COLUMNS`].
    pub async fn list(&self) -> Result<Table> {
        let records = self.inner.refresh_accounts().await?;
        let rows = records
            .iter()
            .map(record_row)
            .collect::<Result<Vec<Row>>>()?;

        Ok(Table::select(ACC_LIST_COLUMNS, rows))
    }

    /// Unlock real-money trading with the trading password.
    ///
    /// The password's MD5 is cached so the unlock can be replayed after the
    /// transport reconnects.
    pub async fn unlock(&self, password: &str) -> Result<()> {
        let password = Password::Plain(SecretString::from(password.to_string()));
        self.inner.unlock(password, true).await
    }

    /// Unlock real-money trading with the hex MD5 of the trading password.
    pub async fn unlock_with_md5(&self, password_md5: &str) -> Result<()> {
        let password = Password::Md5(SecretString::from(password_md5.to_string()));
        self.inner.unlock(password, true).await
    }

    /// Lock real-money trading again and forget the cached credential.
    pub async fn lock(&self, password: &str) -> Result<()> {
        let password = Password::Plain(SecretString::from(password.to_string()));
        self.inner.unlock(password, false).await
    }

    /// Get the funds of an account.
    ///
    /// Columns: [`ACC_INFO_COLUMNS`]. Use
    /// [`Table::records`] with [`AccountInfo`](crate::models::AccountInfo)
    /// for typed access.
    pub async fn info(&self, trd_env: TrdEnv, acc_id: AccId) -> Result<Table> {
        self.inner.check_trd_env(trd_env)?;
        let acc_id = self.inner.resolve_acc_id(trd_env, acc_id).await?;

        let rows = self
            .inner
            .query(&AccInfoQuery {
                acc_id,
                trd_env,
                trd_market: self.inner.market,
            })
            .await?;

        Ok(Table::select(ACC_INFO_COLUMNS, rows))
    }
}

fn record_row(record: &AccountRecord) -> Result<Row> {
    Ok(serde_json::from_value(serde_json::to_value(record)?)?)
}
