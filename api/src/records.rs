use std::fmt::Display;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::error;

use crate::error::ClientError;

/// Generic record access against the `/api/{type}/{id}` surface.
///
/// Records are opaque JSON objects; no client-side schema exists. Ids are
/// strings or numbers on the wire, so anything [`Display`] is accepted.
pub struct RecordClient {
    base_url: String,
    http: Client,
}

impl RecordClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches a record by type and id. `None` on any failure.
    pub async fn get_record_by_id(
        &self,
        record_type: &str,
        record_id: impl Display,
    ) -> Option<Value> {
        let url = format!("{}/api/{record_type}/{record_id}", self.base_url);

        match self.request_json(self.http.get(&url)).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!("failed to fetch {record_type} record: {e}");
                None
            }
        }
    }

    /// Creates a record, returning it with any server-assigned fields.
    pub async fn create_record(&self, record_type: &str, data: &Value) -> Option<Value> {
        let url = format!("{}/api/{record_type}", self.base_url);

        match self.request_json(self.http.post(&url).json(data)).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!("failed to create {record_type} record: {e}");
                None
            }
        }
    }

    /// Updates a record by id, returning the updated record.
    pub async fn update_record_by_id(
        &self,
        record_type: &str,
        record_id: impl Display,
        data: &Value,
    ) -> Option<Value> {
        let url = format!("{}/api/{record_type}/{record_id}", self.base_url);

        match self.request_json(self.http.put(&url).json(data)).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!("failed to update {record_type} record: {e}");
                None
            }
        }
    }

    /// Deletes a record by id. `true` only on a 2xx reply.
    pub async fn delete_record_by_id(&self, record_type: &str, record_id: impl Display) -> bool {
        let url = format!("{}/api/{record_type}/{record_id}", self.base_url);

        let response = match self.http.delete(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("failed to delete {record_type} record: {e}");
                return false;
            }
        };

        if !response.status().is_success() {
            error!(
                "failed to delete {record_type} record: server replied {}",
                response.status()
            );
            return false;
        }

        true
    }

    async fn request_json(&self, request: RequestBuilder) -> Result<Value, ClientError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
