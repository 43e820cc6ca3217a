// ── Scoreboard session ──
//
// Lifecycle for one server connection: builds the API client, logs in
// when credentials are configured, owns the change notifier and its
// background poll task, and logs out on disconnect.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use scoreboard_api::{ApiClient, CurrentUser};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::notifier::{CallbackGuard, ChangeNotifier, Subscription};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Reads and writes go straight
/// through [`api()`](Self::api); freshness signals come from
/// [`watch()`](Self::watch) or [`on_change()`](Self::on_change).
#[derive(Clone)]
pub struct Scoreboard {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: ClientConfig,
    api: ApiClient,
    notifier: ChangeNotifier<ApiClient>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
    logged_in: AtomicBool,
}

impl Scoreboard {
    /// Create a session from configuration. Does NOT contact the server --
    /// call [`connect()`](Self::connect) to log in.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.url.clone(), &config.transport())?;
        Ok(Self::with_api(config, api))
    }

    /// Create a session around an existing API client.
    pub fn with_api(config: ClientConfig, api: ApiClient) -> Self {
        // Clones share the cookie jar, so the poller sees the login session.
        let notifier = ChangeNotifier::new(api.clone(), &config.notifier);
        Self {
            inner: Arc::new(SessionInner {
                config,
                api,
                notifier,
                poll_task: Mutex::new(None),
                logged_in: AtomicBool::new(false),
            }),
        }
    }

    /// Access the session configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Access the typed API client.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Access the change notifier.
    pub fn notifier(&self) -> &ChangeNotifier<ApiClient> {
        &self.inner.notifier
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Log in (when credentials are configured) and report who the server
    /// thinks we are.
    pub async fn connect(&self) -> Result<CurrentUser, CoreError> {
        if let Some(creds) = &self.inner.config.credentials {
            self.inner
                .api
                .login(&creds.username, &creds.password)
                .await
                .map_err(|e| match CoreError::from(e) {
                    CoreError::AuthenticationFailed { .. } => CoreError::AuthenticationFailed {
                        message: format!("invalid username or password for '{}'", creds.username),
                    },
                    other => other,
                })?;
            self.inner.logged_in.store(true, Ordering::Release);
            debug!(username = %creds.username, "session authentication successful");
        }

        let user = self.inner.api.current_user().await?;
        info!(username = ?user.username, url = %self.inner.config.url, "connected to scoreboard server");
        Ok(user)
    }

    /// Whether [`connect()`](Self::connect) logged in.
    pub fn is_logged_in(&self) -> bool {
        self.inner.logged_in.load(Ordering::Acquire)
    }

    /// Make sure the background poll task is running.
    async fn ensure_polling(&self) {
        let mut task = self.inner.poll_task.lock().await;
        if task.is_none() && !self.inner.notifier.is_shut_down() {
            *task = Some(self.inner.notifier.spawn());
        }
    }

    /// Subscribe to server-side changes, starting the poller if needed.
    pub async fn watch(&self) -> Subscription {
        self.ensure_polling().await;
        self.inner.notifier.subscribe()
    }

    /// Register a change callback, starting the poller if needed.
    pub async fn on_change<F>(&self, callback: F) -> CallbackGuard
    where
        F: FnMut() + Send + 'static,
    {
        self.ensure_polling().await;
        self.inner.notifier.on_change(callback)
    }

    /// Stop polling and end the server session.
    pub async fn disconnect(&self) {
        self.inner.notifier.shutdown();
        if let Some(handle) = self.inner.poll_task.lock().await.take() {
            let _ = handle.await;
        }

        if self.inner.logged_in.swap(false, Ordering::AcqRel) {
            if let Err(e) = self.inner.api.logout().await {
                warn!(error = %e, "logout failed (non-fatal)");
            }
        }
        debug!("disconnected");
    }
}
