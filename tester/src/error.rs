use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StubError {
    #[error("Record not found")]
    MissingRecord,

    #[error("Malformed payload")]
    MalformedPayload,
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let status = match self {
            StubError::MissingRecord => StatusCode::NOT_FOUND,
            StubError::MalformedPayload => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
