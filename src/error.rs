use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::repo::StoreError;

pub const USER_EXISTS: &str = "User already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const NO_TOKEN: &str = "No token, authorization denied";
pub const INVALID_TOKEN: &str = "Token is not valid";

/// One entry of the `errors` array returned on client errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ErrorDetail {
    pub fn message(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: None,
            location: None,
        }
    }

    pub fn field(param: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: Some(param.to_string()),
            location: Some("body".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed one or more field checks.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<ErrorDetail>),

    /// Client error with a single, deliberately uninformative message.
    #[error("{0}")]
    Rejected(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// Store, hasher or signer failure. Never shown to the caller.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AppError::Rejected(USER_EXISTS),
            StoreError::Backend(e) => AppError::Internal(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                debug!(count = errors.len(), "validation failed");
                (StatusCode::BAD_REQUEST, Json(ErrorBody { errors })).into_response()
            }
            AppError::Rejected(msg) => {
                debug!(msg, "request rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody {
                        errors: vec![ErrorDetail::message(msg)],
                    }),
                )
                    .into_response()
            }
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    errors: vec![ErrorDetail::message(msg)],
                }),
            )
                .into_response(),
            AppError::Internal(e) => {
                error!(error = ?e, "server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }
}
