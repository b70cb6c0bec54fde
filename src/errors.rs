//! Error handling for search endpoints.
//!
//! Every failure is request-fatal and reported synchronously: nothing is
//! retried and there is no deferred error channel. Responses carry sanitized
//! messages; database detail is logged through `tracing` and never sent to
//! the client. An empty result set is not an error — it is reported through
//! the response envelope (`{result: [], status: false}`, HTTP 404).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

/// Failure modes of one search invocation.
#[derive(Debug)]
pub enum SearchError {
    /// 422 - the request body violated a field-level constraint.
    Validation {
        /// User-facing description of each violated constraint.
        errors: Vec<String>,
    },

    /// 400 - the named model or resource is not registered.
    ///
    /// The message deliberately does not distinguish which name failed.
    UnknownTarget,

    /// 422 - a relationship path segment does not exist on the target entity.
    UnknownRelation {
        /// The path segment that failed to resolve.
        relation: String,
    },

    /// 500 - query execution failed (details logged, not exposed).
    Database {
        /// User-facing generic message.
        message: String,
        /// Internal error (logged, not sent to the client).
        internal: DbErr,
    },
}

impl SearchError {
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    #[must_use]
    pub fn unknown_target() -> Self {
        Self::UnknownTarget
    }

    pub fn unknown_relation(relation: impl Into<String>) -> Self {
        Self::UnknownRelation {
            relation: relation.into(),
        }
    }

    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::UnknownRelation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::UnknownTarget => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Validation { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::UnknownTarget => "Invalid model or resource".to_string(),
            Self::UnknownRelation { relation } => {
                format!("Unknown relationship '{relation}'")
            }
            Self::Database { message, .. } => message.clone(),
        }
    }

    /// Log internal detail. Only the database variant carries anything the
    /// client must not see; the rest log at debug level for visibility.
    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error during search");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Search request rejected"
                );
            }
        }
    }
}

/// Error body sent to clients (sanitized).
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::Validation { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for SearchError {}

impl From<DbErr> for SearchError {
    fn from(err: DbErr) -> Self {
        Self::database(err)
    }
}
