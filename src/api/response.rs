//! Response types for the payroll API.
//!
//! This module defines the error response structures and maps every
//! [`PayrollError`] to an HTTP status and a stable error code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with a validation error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            PayrollError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PayrollError::DuplicatePeriod { .. } => (StatusCode::CONFLICT, "DUPLICATE_PERIOD"),
            PayrollError::NoEligibleEmployees { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NO_ELIGIBLE_EMPLOYEES")
            }
            PayrollError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PayrollError::InvalidStateTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION")
            }
            PayrollError::RunNotEditable { .. } => (StatusCode::CONFLICT, "RUN_NOT_EDITABLE"),
            PayrollError::NonLeafAccount { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NON_LEAF_ACCOUNT")
            }
            PayrollError::InactiveAccount { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INACTIVE_ACCOUNT")
            }
            PayrollError::InactiveBankAccount { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INACTIVE_BANK_ACCOUNT")
            }
            PayrollError::InactiveCostCenter { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INACTIVE_COST_CENTER")
            }
            PayrollError::IncompleteLedgerLinkage { .. } => {
                (StatusCode::CONFLICT, "INCOMPLETE_LEDGER_LINKAGE")
            }
            PayrollError::CannotCancelPaidRun { .. } => {
                (StatusCode::CONFLICT, "CANNOT_CANCEL_PAID_RUN")
            }
            PayrollError::LedgerGateway { .. } => (StatusCode::BAD_GATEWAY, "LEDGER_GATEWAY_ERROR"),
            PayrollError::ItemRejected { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ITEM_REJECTED")
            }
            PayrollError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
                return ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                };
            }
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
