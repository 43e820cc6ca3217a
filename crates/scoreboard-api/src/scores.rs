// Score endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{Empty, Score, ScoreId, ScoresQuery, UpsertScore, UpsertScoreOutput};

impl ApiClient {
    /// Scores recorded against a scorable, highest first.
    ///
    /// `POST /scores` with `{"scorable_id": "...", "limit"?: N}`
    pub async fn scores(&self, query: &ScoresQuery) -> Result<Vec<Score>, Error> {
        self.post(Endpoint::Scores, query).await
    }

    /// Record or amend a score, returning its id.
    ///
    /// `POST /upsert_score` with
    /// `{"id"?, "scorable_id", "username"?, "value", "date"?}`
    pub async fn upsert_score(&self, score: &UpsertScore) -> Result<UpsertScoreOutput, Error> {
        debug!(
            id = ?score.id,
            scorable_id = %score.scorable_id,
            value = score.value,
            "upserting score"
        );
        self.post(Endpoint::UpsertScore, score).await
    }

    /// Delete a score.
    ///
    /// `POST /delete_score` with `{"id": "..."}`
    pub async fn delete_score(&self, id: &ScoreId) -> Result<(), Error> {
        debug!(%id, "deleting score");
        let _: Empty = self.post(Endpoint::DeleteScore, &json!({ "id": id })).await?;
        Ok(())
    }
}
