//! HTTP error mapping

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::errors::CampusError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Malformed path parameter: {0}")]
    MalformedPath(String),

    #[error(transparent)]
    Store(#[from] CampusError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MalformedPath(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::MalformedPath(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(CampusError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(CampusError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(CampusError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(err) if !err.is_client_error() => {
                error!(error = %err, severity = %err.severity(), "Request failed");
                "Internal server error".to_string()
            }
            other => {
                warn!(error = %other, status = status.as_u16(), "Request rejected");
                other.to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
