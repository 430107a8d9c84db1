//! HTTP API module for the payroll engine.
//!
//! This module exposes the payroll lifecycle as a JSON REST API. Handlers
//! are thin: they decode requests, call the orchestrator or the query
//! service, and map [`PayrollError`](crate::error::PayrollError) values to
//! structured error responses.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{USER_ID_HEADER, create_router};
pub use request::{ListRunsParams, PreviewParams, UpdateDraftRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
