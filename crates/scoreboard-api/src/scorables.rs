// Scorable endpoints
//
// Scorables always belong to a group; listing is group-scoped.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{Empty, GroupId, Scorable, ScorableId, UpsertScorable};

impl ApiClient {
    /// List the scorables in a group.
    ///
    /// `POST /scorables_in_group` with `{"group_id": "..."}`
    pub async fn scorables_in_group(&self, group_id: &GroupId) -> Result<Vec<Scorable>, Error> {
        self.post(Endpoint::ScorablesInGroup, &json!({ "group_id": group_id }))
            .await
    }

    /// Fetch a single scorable.
    ///
    /// `POST /get_scorable` with `{"id": "..."}`
    pub async fn get_scorable(&self, id: &ScorableId) -> Result<Scorable, Error> {
        self.post(Endpoint::GetScorable, &json!({ "id": id })).await
    }

    /// Create or rename a scorable, returning the stored scorable.
    ///
    /// `POST /upsert_scorable` with `{"id"?: "...", "group_id": "...", "name": "..."}`
    pub async fn upsert_scorable(&self, scorable: &UpsertScorable) -> Result<Scorable, Error> {
        debug!(
            id = ?scorable.id,
            group_id = %scorable.group_id,
            name = %scorable.name,
            "upserting scorable"
        );
        self.post(Endpoint::UpsertScorable, scorable).await
    }

    /// Delete a scorable.
    ///
    /// `POST /delete_scorable` with `{"id": "..."}`
    pub async fn delete_scorable(&self, id: &ScorableId) -> Result<(), Error> {
        debug!(%id, "deleting scorable");
        let _: Empty = self
            .post(Endpoint::DeleteScorable, &json!({ "id": id }))
            .await?;
        Ok(())
    }
}
