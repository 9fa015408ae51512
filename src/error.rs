use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("user not found")]
    NotFound,

    #[error("storage unavailable")]
    StorageUnavailable(#[source] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::StorageUnavailable(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(msg) => {
                warn!(reason = %msg, "validation failed");
                (status, msg).into_response()
            }
            // negative lookups are a normal outcome, the body stays empty
            ApiError::NotFound => {
                debug!("user not found");
                status.into_response()
            }
            ApiError::StorageUnavailable(e) => {
                error!(error = ?e, "storage failure");
                (status, "Storage unavailable").into_response()
            }
        }
    }
}
