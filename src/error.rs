//! Typed errors and HTTP mapping.

use crate::response::{json_response, ErrorBody};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Startup configuration errors. Never reach an HTTP client.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Not Acceptable")]
    NotAcceptable,
    #[error("Payload Too Large")]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

pub const NOT_ACCEPTABLE_DETAILS: &str = "This API only supports 'application/json' responses.";

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error while handling request");
                ErrorBody::new("Internal Server Error")
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error while handling request");
                ErrorBody::new("Internal Server Error")
            }
            AppError::NotAcceptable => {
                ErrorBody::new(self.to_string()).with_details(NOT_ACCEPTABLE_DETAILS.into())
            }
            _ => ErrorBody::new(self.to_string()),
        };
        json_response(status, &body)
    }
}
