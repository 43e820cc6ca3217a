// scoreboard-api: Async Rust client for the scoreboard JSON API

pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod transport;

mod groups;
mod scorables;
mod scores;
mod session;
mod users;

pub use client::ApiClient;
pub use endpoint::Endpoint;
pub use error::Error;
pub use models::{
    ChangeMarker, CurrentUser, Empty, Group, GroupId, LastChanged, Scorable, ScorableId, Score,
    ScoreId, ScoresQuery, UpsertGroup, UpsertScorable, UpsertScore, UpsertScoreOutput,
};
pub use transport::{TlsMode, TransportConfig};
