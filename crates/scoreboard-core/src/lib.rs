//! Session facade and change notification between `scoreboard-api` and its
//! consumers (the CLI, or any UI that shows scoreboard data).
//!
//! - **[`Scoreboard`]** -- One server session: builds the API client,
//!   [`connect()`](Scoreboard::connect) logs in, [`watch()`](Scoreboard::watch)
//!   starts the change poller on demand, [`disconnect()`](Scoreboard::disconnect)
//!   stops it and logs out.
//!
//! - **[`ChangeNotifier`]** -- Polls the server's `last_changed` marker on a
//!   fixed period while anyone is subscribed and bumps a shared counter on
//!   every change. One request per tick serves all subscribers.
//!
//! - **[`Subscription`] / [`CallbackGuard`]** -- Scoped registrations. Both
//!   fire once on registration ("check now") and again after each change;
//!   dropping them unregisters.

pub mod config;
pub mod error;
pub mod notifier;
pub mod session;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, Credentials, NotifierConfig, TlsVerification};
pub use error::{CoreError, PollError};
pub use notifier::{CallbackGuard, ChangeNotifier, PollOutcome, Subscription, SubscriptionStream};
pub use session::Scoreboard;
pub use source::ChangeSource;

pub use scoreboard_api as api;
