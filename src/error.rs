use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("completion provider failed: {0:#}")]
    Provider(anyhow::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Provider and internal details stay in the log.
        let message = match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Provider(_) => {
                error!("{}", self);
                "The assistant is unavailable right now.".to_string()
            }
            ApiError::Internal(_) => {
                error!("{}", self);
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
