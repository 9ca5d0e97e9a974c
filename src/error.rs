// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every failure a flow can observe maps to one of these variants. Flows
//! catch them at the triggering action, log them, and translate them into a
//! screen-level effect; none of them should ever abort the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Local persistence unavailable.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Authorization denied, cancelled, or token exchange failed.
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Network failure (`status` is `None`) or non-2xx response.
    #[error("HTTP error ({}): {message}", display_status(.status))]
    Http {
        status: Option<u16>,
        message: String,
    },

    /// One or more form fields failed validation.
    #[error("Invalid form: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build an HTTP error for a transport-level failure.
    pub fn network(err: impl std::fmt::Display) -> Self {
        AppError::Http {
            status: None,
            message: err.to_string(),
        }
    }

    /// Build an HTTP error for a non-2xx response.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        AppError::Http {
            status: Some(status),
            message: body.into(),
        }
    }

    /// True when the remote service rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: Some(401), .. })
    }

    /// True when the request never produced a response.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Http { status: None, .. })
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no response".to_string(),
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Auth(msg) => (StatusCode::BAD_REQUEST, "auth_error", Some(msg.clone())),
            AppError::Validation(errs) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                Some(errs.to_string()),
            ),
            AppError::Http { .. } => (StatusCode::BAD_GATEWAY, "strava_error", None),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
