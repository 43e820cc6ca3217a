// Group endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{Empty, Group, GroupId, UpsertGroup};

impl ApiClient {
    /// List every group.
    ///
    /// `GET /groups`
    pub async fn groups(&self) -> Result<Vec<Group>, Error> {
        self.get(Endpoint::Groups).await
    }

    /// Fetch a single group.
    ///
    /// `POST /get_group` with `{"id": "..."}`
    pub async fn get_group(&self, id: &GroupId) -> Result<Group, Error> {
        self.post(Endpoint::GetGroup, &json!({ "id": id })).await
    }

    /// Create or rename a group, returning the stored group.
    ///
    /// `POST /upsert_group` with `{"id"?: "...", "name": "..."}`
    pub async fn upsert_group(&self, group: &UpsertGroup) -> Result<Group, Error> {
        debug!(id = ?group.id, name = %group.name, "upserting group");
        self.post(Endpoint::UpsertGroup, group).await
    }

    /// Delete a group.
    ///
    /// `POST /delete_group` with `{"id": "..."}`
    pub async fn delete_group(&self, id: &GroupId) -> Result<(), Error> {
        debug!(%id, "deleting group");
        let _: Empty = self.post(Endpoint::DeleteGroup, &json!({ "id": id })).await?;
        Ok(())
    }
}
