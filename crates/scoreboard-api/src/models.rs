// Wire types for the scoreboard API.
//
// Request types serialize exactly the fields the server reads; optional
// fields are omitted rather than sent as `null`. Response types derive
// both directions so the CLI can re-emit them as JSON/YAML.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

// ── Identifiers ─────────────────────────────────────────────────────

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

opaque_id!(
    /// Server-assigned group identifier. Kept verbatim, never parsed.
    GroupId
);
opaque_id!(
    /// Server-assigned scorable identifier.
    ScorableId
);
opaque_id!(
    /// Server-assigned score identifier.
    ScoreId
);

/// Server-reported time of the most recent data mutation.
///
/// Treated as an opaque token: two markers are compared for equality only,
/// never ordered or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeMarker(String);

impl ChangeMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Responses ───────────────────────────────────────────────────────

/// The `{}` body returned by endpoints with nothing to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// `current_user` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// `None` when the session is not logged in.
    pub username: Option<String>,
}

/// `last_changed` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastChanged {
    pub date: ChangeMarker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorable {
    pub id: ScorableId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub id: ScoreId,
    pub username: String,
    pub value: i64,
    pub date: DateTime<Utc>,
}

/// `upsert_score` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertScoreOutput {
    pub id: ScoreId,
}

// ── Requests ────────────────────────────────────────────────────────

/// `login` / `upsert_user` body.
#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(serialize_with = "expose_secret")]
    pub password: &'a SecretString,
}

fn expose_secret<S: Serializer>(secret: &&SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Create or update a group. Omit `id` to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupId>,
    pub name: String,
}

/// Create or update a scorable inside a group. Omit `id` to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertScorable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ScorableId>,
    pub group_id: GroupId,
    pub name: String,
}

/// Create or update a score.
///
/// The server fills in a fresh `id`, the logged-in user for `username`,
/// and the current time for `date` when they are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ScoreId>,
    pub scorable_id: ScorableId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// `scores` query: highest first, optionally capped at `limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoresQuery {
    pub scorable_id: ScorableId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}
