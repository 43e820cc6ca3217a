// ── Change marker source ──
//
// The seam between the notifier and the network. Production code polls
// the API client; tests substitute a scripted source.

use std::future::Future;

use scoreboard_api::{ApiClient, ChangeMarker};

use crate::error::CoreError;

/// Something that can report the server's current change marker.
pub trait ChangeSource: Send + Sync + 'static {
    /// Fetch the latest change marker.
    fn fetch_marker(&self) -> impl Future<Output = Result<ChangeMarker, CoreError>> + Send;
}

impl ChangeSource for ApiClient {
    fn fetch_marker(&self) -> impl Future<Output = Result<ChangeMarker, CoreError>> + Send {
        async move { Ok(self.last_changed().await?) }
    }
}

impl<T: ChangeSource> ChangeSource for std::sync::Arc<T> {
    fn fetch_marker(&self) -> impl Future<Output = Result<ChangeMarker, CoreError>> + Send {
        T::fetch_marker(self)
    }
}
