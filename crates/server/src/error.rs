//! Unified error handling for the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maruzzella_core::access::AccessDenied;
use maruzzella_core::engine::{ClockError, DirectoryError, PayrollError};
use maruzzella_core::export::ExportError;
use maruzzella_core::model::{ShiftError, SnapshotError};
use serde::Serialize;
use thiserror::Error;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation; nothing was changed.
    #[error("{0}")]
    BadRequest(String),

    /// No session, or wrong PIN.
    #[error("{0}")]
    Unauthorized(String),

    /// The signed-in employee may not do this.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// The request clashes with the current state (e.g. clocking out twice).
    #[error("{0}")]
    Conflict(String),

    /// CSV export failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Export(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Export(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Export(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<ShiftError> for AppError {
    fn from(err: ShiftError) -> Self {
        match err {
            ShiftError::NotFound { .. } => Self::NotFound(err.to_string()),
            _ => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<ClockError> for AppError {
    fn from(err: ClockError) -> Self {
        Self::Conflict(err.to_string())
    }
}

impl From<PayrollError> for AppError {
    fn from(err: PayrollError) -> Self {
        match err {
            PayrollError::LogNotFound(_) => Self::NotFound(err.to_string()),
            PayrollError::NotPending(_) | PayrollError::LogIdsExhausted(_) => {
                Self::Conflict(err.to_string())
            }
            PayrollError::ClockOutBeforeClockIn => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            DirectoryError::NotFound(_) => Self::NotFound(err.to_string()),
            DirectoryError::IdsExhausted(_) => Self::Conflict(err.to_string()),
            _ => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Set the Sentry user context from an employee.
pub fn set_sentry_user(employee_id: i64, name: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(employee_id.to_string()),
            username: Some(name.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
