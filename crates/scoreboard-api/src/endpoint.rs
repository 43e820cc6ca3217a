// Named remote operations.
//
// The wire name of each endpoint is the snake_case variant name and is
// appended to the API base URL to form the request path.

use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// Every route exposed by the scoreboard server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    Login,
    Logout,
    CurrentUser,
    UpsertUser,
    DeleteUser,
    UpsertGroup,
    DeleteGroup,
    GetGroup,
    UpsertScorable,
    GetScorable,
    DeleteScorable,
    UpsertScore,
    DeleteScore,
    Groups,
    ScorablesInGroup,
    Scores,
    LastChanged,
}

impl Endpoint {
    /// The path segment for this endpoint (e.g. `"scorables_in_group"`).
    pub fn name(self) -> &'static str {
        self.into()
    }
}
