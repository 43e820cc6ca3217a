// User management endpoints

use secrecy::SecretString;
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{Credentials, Empty};

impl ApiClient {
    /// Create a user or change a user's password.
    ///
    /// `POST /upsert_user` with `{"username": "...", "password": "..."}`.
    /// With `username: None` the password of the logged-in user is changed.
    pub async fn upsert_user(
        &self,
        username: Option<&str>,
        password: &SecretString,
    ) -> Result<(), Error> {
        debug!(?username, "upserting user");
        let _: Empty = self
            .post(Endpoint::UpsertUser, &Credentials { username, password })
            .await?;
        Ok(())
    }

    /// Delete a user.
    ///
    /// `POST /delete_user` with `{"username": "..."}`
    pub async fn delete_user(&self, username: &str) -> Result<(), Error> {
        debug!(username, "deleting user");
        let _: Empty = self
            .post(Endpoint::DeleteUser, &json!({ "username": username }))
            .await?;
        Ok(())
    }
}
