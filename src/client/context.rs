//! Trade context implementation.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use crate::api::{AccountsService, DealsService, OrdersService, PositionsService};
use crate::gateway::{self, proto, GetAccList, SubAccPush, TradeGateway, TradeQuery, UnlockTrade};
use crate::models::{AccId, AccountRecord, TrdEnv, TrdMarket};
use crate::push::TradeNotification;
use crate::{Error, Result};

use super::config::ContextConfig;

/// A trade context bound to one market.
///
/// Every operation validates its parameters locally, resolves the account
/// to trade in, forwards a keyword bundle to the gateway, and returns the
/// reply as a fixed-column [`Table`](crate::models::Table).
///
/// The context is cheap to clone; clones share the account cache, the
/// unlock credential and the push subscription.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use futu_trade_rs::{TradeContext, TrdEnv, AccId};
/// use futu_trade_rs::gateway::TradeGateway;
///
/// # async fn example(gateway: Arc<dyn TradeGateway>) -> futu_trade_rs::Result<()> {
/// let ctx = TradeContext::hk(gateway);
///
/// let accounts = ctx.accounts().list().await?;
/// println!("{} accounts", accounts.len());
///
/// ctx.accounts().unlock("123456").await?;
/// let funds = ctx.accounts().info(TrdEnv::Real, AccId::DEFAULT).await?;
/// println!("{:?}", funds.get(0, "Power"));
/// # Ok(())
/// # }
/// ```
pub struct TradeContext {
    pub(crate) inner: Arc<ContextInner>,
}

pub(crate) struct ContextInner {
    pub(crate) market: TrdMarket,
    pub(crate) gateway: Arc<dyn TradeGateway>,
    pub(crate) config: ContextConfig,
    state: RwLock<ContextState>,
    notifications: broadcast::Sender<TradeNotification>,
}

#[derive(Default)]
struct ContextState {
    accounts: Vec<AccountRecord>,
    unlock: Option<SecretString>,
    acc_push: SubscriptionState,
}

/// Progress of the account push subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionState {
    /// Not subscribed; the next account resolution will subscribe
    #[default]
    Idle,
    /// Request sent, waiting for the gateway's answer
    Pending,
    /// The gateway confirmed the subscription
    Active,
}

/// Trading password as given by the caller.
pub(crate) enum Password {
    Plain(SecretString),
    Md5(SecretString),
}

impl Password {
    /// Lower-case hex MD5 of the password.
    fn md5_hex(&self) -> String {
        match self {
            Password::Plain(p) => format!("{:x}", md5::compute(p.expose_secret().as_bytes())),
            Password::Md5(h) => h.expose_secret().trim().to_ascii_lowercase(),
        }
    }
}

impl TradeContext {
    /// Create a context for `market` with default configuration.
    pub fn new(market: TrdMarket, gateway: Arc<dyn TradeGateway>) -> Self {
        Self::with_config(market, gateway, ContextConfig::default())
    }

    /// Create a context for `market` with custom configuration.
    pub fn with_config(
        market: TrdMarket,
        gateway: Arc<dyn TradeGateway>,
        config: ContextConfig,
    ) -> Self {
        let (notifications, _) = broadcast::channel(config.notification_capacity.max(1));

        Self {
            inner: Arc::new(ContextInner {
                market,
                gateway,
                config,
                state: RwLock::new(ContextState::default()),
                notifications,
            }),
        }
    }

    /// Create a Hong Kong trade context.
    pub fn hk(gateway: Arc<dyn TradeGateway>) -> Self {
        Self::new(TrdMarket::Hk, gateway)
    }

    /// Create a US trade context.
    pub fn us(gateway: Arc<dyn TradeGateway>) -> Self {
        Self::new(TrdMarket::Us, gateway)
    }

    /// The market this context trades in.
    pub fn market(&self) -> TrdMarket {
        self.inner.market
    }

    /// The configuration in effect.
    pub fn config(&self) -> &ContextConfig {
        &self.inner.config
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the positions service.
    pub fn positions(&self) -> PositionsService {
        PositionsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the deals service.
    pub fn deals(&self) -> DealsService {
        DealsService::new(self.inner.clone())
    }

    /// Receive decoded order and deal pushes.
    pub fn notifications(&self) -> broadcast::Receiver<TradeNotification> {
        self.inner.notifications.subscribe()
    }

    /// Accounts cached by the last account-list query.
    pub async fn cached_accounts(&self) -> Vec<AccountRecord> {
        self.inner.state.read().await.accounts.clone()
    }

    /// Returns `true` if an unlock credential is cached.
    pub async fn is_unlocked(&self) -> bool {
        self.inner.state.read().await.unlock.is_some()
    }

    /// Current state of the account push subscription.
    pub async fn acc_push_state(&self) -> SubscriptionState {
        self.inner.state.read().await.acc_push
    }

    /// Forget the account push subscription so the next account
    /// resolution subscribes again.
    pub async fn reset_acc_push(&self) {
        self.inner.set_acc_push(SubscriptionState::Idle).await;
    }

    /// Must be called by the transport after its API socket reconnects.
    ///
    /// Resets the account push subscription and, if an unlock credential
    /// is cached, replays the unlock until it succeeds or the configured
    /// attempts run out. When every attempt fails the credential is
    /// dropped, so real-money orders need a fresh unlock.
    pub async fn on_api_socket_reconnected(&self) {
        self.inner.set_acc_push(SubscriptionState::Idle).await;

        let Some(password_md5) = self.inner.cached_unlock().await else {
            return;
        };

        let replay = &self.inner.config.unlock_replay;
        for attempt in 1..=replay.max_attempts {
            let password = Password::Md5(SecretString::from(password_md5.clone()));
            match self.inner.unlock(password, true).await {
                Ok(()) => {
                    tracing::info!(attempt, "Unlock replayed after reconnection");
                    return;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Unlock replay failed");
                    if attempt < replay.max_attempts {
                        tokio::time::sleep(replay.interval).await;
                    }
                }
            }
        }

        if replay.is_enabled() {
            self.inner.state.write().await.unlock = None;
            tracing::error!(
                attempts = replay.max_attempts,
                "Giving up on unlock replay after reconnection; trading is locked again"
            );
        }
    }

    /// Report the outcome of an account push subscription.
    ///
    /// Success marks a pending subscription active; failure is logged and
    /// allows the next account resolution to subscribe again.
    pub async fn on_async_sub_acc_push(&self, result: Result<()>) {
        self.inner.on_async_sub_acc_push(result).await;
    }

    /// Must be called by the transport for every push frame it receives.
    ///
    /// `reply` is the decoded payload, or the gateway's error for a failed
    /// push (e.g. a rejected account subscription).
    pub async fn on_push(&self, proto_id: u32, reply: Result<Value>) {
        if proto_id == proto::SUB_ACC_PUSH {
            self.inner.on_async_sub_acc_push(reply.map(|_| ())).await;
            return;
        }

        match reply {
            Ok(body) => {
                let notification = TradeNotification::decode(proto_id, body);
                // No receivers is fine
                let _ = self.inner.notifications.send(notification);
            }
            Err(e) => tracing::warn!(proto_id, error = %e, "Dropping failed push"),
        }
    }

    /// Close the underlying gateway.
    pub async fn close(&self) -> Result<()> {
        self.inner.gateway.close().await
    }
}

impl ContextInner {
    /// Send a query to the gateway and decode its reply.
    pub(crate) async fn query<Q: TradeQuery>(&self, query: &Q) -> Result<Q::Response> {
        let body = gateway::pack(query)?;
        tracing::debug!(proto_id = Q::PROTO_ID, market = %self.market, "Sending trade request");

        let reply = self.gateway.request(Q::PROTO_ID, body).await.map_err(|e| {
            tracing::debug!(proto_id = Q::PROTO_ID, error = %e, "Trade request failed");
            e
        })?;

        gateway::unpack::<Q>(reply)
    }

    /// Send a query on the push connection.
    async fn send_async<Q: TradeQuery>(&self, query: &Q) -> Result<()> {
        let body = gateway::pack(query)?;
        self.gateway.send_async(Q::PROTO_ID, body).await
    }

    /// Fail unless `env` is allowed in this context's market.
    pub(crate) fn check_trd_env(&self, env: TrdEnv) -> Result<()> {
        if self.market.supports(env) {
            Ok(())
        } else {
            Err(Error::wrong_param("environment"))
        }
    }

    /// Fail if a real-money trading action is attempted while locked.
    pub(crate) async fn check_unlocked(&self, env: TrdEnv) -> Result<()> {
        if env.is_real() && self.config.require_unlock_for_real && self.cached_unlock().await.is_none() {
            return Err(Error::NotUnlocked);
        }
        Ok(())
    }

    /// Fetch the login user's accounts and cache the ones trading in this
    /// market.
    pub(crate) async fn refresh_accounts(&self) -> Result<Vec<AccountRecord>> {
        let entries = self
            .query(&GetAccList {
                user_id: self.gateway.login_user_id(),
            })
            .await?;

        let records: Vec<AccountRecord> = entries
            .iter()
            .filter(|entry| entry.trades_in(self.market))
            .map(AccountRecord::from)
            .collect();

        tracing::debug!(market = %self.market, count = records.len(), "Cached account list");
        self.state.write().await.accounts = records.clone();

        Ok(records)
    }

    /// Resolve an explicit or default account id.
    ///
    /// The default id fetches the account list first if nothing is cached.
    /// Any successful resolution makes sure account pushes are subscribed.
    pub(crate) async fn resolve_acc_id(&self, env: TrdEnv, acc_id: AccId) -> Result<AccId> {
        let acc_id = if acc_id.is_default() {
            if self.state.read().await.accounts.is_empty() {
                self.refresh_accounts().await?;
            }
            self.default_acc_id(env).await
        } else {
            acc_id
        };

        if acc_id.is_default() {
            return Err(Error::NoAccount);
        }

        self.ensure_acc_push().await;
        Ok(acc_id)
    }

    async fn default_acc_id(&self, env: TrdEnv) -> AccId {
        self.state
            .read()
            .await
            .accounts
            .iter()
            .find(|record| record.trd_env == env)
            .map(|record| record.acc_id)
            .unwrap_or(AccId::DEFAULT)
    }

    /// Subscribe to account pushes unless a subscription is already under
    /// way. Failures are logged, never returned.
    async fn ensure_acc_push(&self) {
        if self.state.read().await.acc_push != SubscriptionState::Idle {
            return;
        }

        if self.state.read().await.accounts.is_empty() {
            if let Err(e) = self.refresh_accounts().await {
                tracing::warn!(error = %e, "Cannot subscribe account pushes without an account list");
                return;
            }
        }

        let acc_id_list: Vec<AccId> = {
            let mut state = self.state.write().await;
            if state.acc_push != SubscriptionState::Idle || state.accounts.is_empty() {
                return;
            }
            state.acc_push = SubscriptionState::Pending;
            state.accounts.iter().map(|record| record.acc_id).collect()
        };

        tracing::info!(count = acc_id_list.len(), "Subscribing account pushes");
        if let Err(e) = self.send_async(&SubAccPush { acc_id_list }).await {
            tracing::warn!(error = %e, "Account push subscription could not be sent");
            self.set_acc_push(SubscriptionState::Idle).await;
        }
    }

    /// Result of an account push subscription, as reported by the gateway.
    ///
    /// Only a pending subscription becomes active; an answer arriving after
    /// a reset belongs to a request the new connection never made.
    pub(crate) async fn on_async_sub_acc_push(&self, result: Result<()>) {
        match result {
            Ok(()) => {
                let mut state = self.state.write().await;
                if state.acc_push == SubscriptionState::Pending {
                    state.acc_push = SubscriptionState::Active;
                } else {
                    tracing::debug!(
                        state = ?state.acc_push,
                        "Ignoring stale account push subscription result"
                    );
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Account push subscription failed");
                self.set_acc_push(SubscriptionState::Idle).await;
            }
        }
    }

    async fn set_acc_push(&self, acc_push: SubscriptionState) {
        self.state.write().await.acc_push = acc_push;
    }

    async fn cached_unlock(&self) -> Option<String> {
        self.state
            .read()
            .await
            .unlock
            .as_ref()
            .map(|md5| md5.expose_secret().to_string())
    }

    /// Unlock or lock real-money trading.
    ///
    /// Requires a real account for this market. On success the credential
    /// is cached for replay (or cleared when locking), the request is
    /// mirrored on the push connection, and unlocking subscribes account
    /// pushes.
    pub(crate) async fn unlock(&self, password: Password, is_unlock: bool) -> Result<()> {
        self.resolve_acc_id(TrdEnv::Real, AccId::DEFAULT).await?;

        let request = UnlockTrade {
            is_unlock,
            password_md5: password.md5_hex(),
        };
        self.query(&request).await?;

        self.state.write().await.unlock = if is_unlock {
            Some(SecretString::from(request.password_md5.clone()))
        } else {
            None
        };
        tracing::info!(market = %self.market, is_unlock, "Trade unlock state changed");

        if let Err(e) = self.send_async(&request).await {
            tracing::warn!(error = %e, "Unlock could not be mirrored on the push connection");
        }

        if is_unlock {
            self.ensure_acc_push().await;
        }

        Ok(())
    }
}

impl Clone for TradeContext {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TradeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeContext")
            .field("market", &self.inner.market)
            .field("config", &self.inner.config)
            .finish()
    }
}
