//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! request gets a correlation id that is attached to its log lines.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PayrollResult;
use crate::orchestrator::{ApproveRun, CancelRun, GenerateRun, PayRun};

use super::request::{ListRunsParams, PreviewParams, UpdateDraftRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

type HandlerResult = Result<Response, Response>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll-runs", post(generate_handler).get(list_handler))
        .route("/payroll-runs/totals", get(totals_handler))
        .route("/payroll-runs/preview", get(preview_handler))
        .route(
            "/payroll-runs/:id",
            get(get_run_handler)
                .patch(update_draft_handler)
                .delete(delete_draft_handler),
        )
        .route("/payroll-runs/:id/approve", post(approve_handler))
        .route("/payroll-runs/:id/pay", post(pay_handler))
        .route("/payroll-runs/:id/cancel", post(cancel_handler))
        .route(
            "/payroll-runs/:id/cancellation-check",
            get(cancellation_check_handler),
        )
        .route(
            "/payroll-runs/:id/payment-summary",
            get(payment_summary_handler),
        )
        .with_state(state)
}

/// Handler for POST /payroll-runs.
///
/// Generates a draft run. Responds 201 with the run and any employees that
/// were left out.
async fn generate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateRun>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let actor = read_actor(correlation_id, &headers)?;
    let command = read_json(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        month = command.month,
        year = command.year,
        actor,
        "Generating payroll run"
    );

    let start_time = Instant::now();
    let result = state.orchestrator().generate(command, actor);
    if let Ok(outcome) = &result {
        info!(
            correlation_id = %correlation_id,
            run_id = outcome.run.run.id,
            items = outcome.run.items.len(),
            failures = outcome.failure_count(),
            duration_us = start_time.elapsed().as_micros(),
            "Generation completed"
        );
    }
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /payroll-runs.
async fn list_handler(
    State(state): State<AppState>,
    params: Result<Query<ListRunsParams>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let params = read_query(correlation_id, params)?;
    let queries = state.queries();
    let result = params
        .into_query(queries.default_query())
        .and_then(|query| queries.list(query));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /payroll-runs/totals.
async fn totals_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    respond(correlation_id, StatusCode::OK, state.queries().totals())
}

/// Handler for GET /payroll-runs/preview.
async fn preview_handler(
    State(state): State<AppState>,
    params: Result<Query<PreviewParams>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let params = read_query(correlation_id, params)?;
    respond(
        correlation_id,
        StatusCode::OK,
        state.orchestrator().preview(params.month, params.year),
    )
}

/// Handler for GET /payroll-runs/:id.
async fn get_run_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    respond(correlation_id, StatusCode::OK, state.orchestrator().run(run_id))
}

/// Handler for PATCH /payroll-runs/:id.
async fn update_draft_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdateDraftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    let update = read_json(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, run_id, "Updating draft payroll run");
    respond(
        correlation_id,
        StatusCode::OK,
        state.orchestrator().update_draft(run_id, update.into()),
    )
}

/// Handler for DELETE /payroll-runs/:id.
async fn delete_draft_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    info!(correlation_id = %correlation_id, run_id, "Deleting draft payroll run");
    match state.orchestrator().delete_draft(run_id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Err(failure(correlation_id, err)),
    }
}

/// Handler for POST /payroll-runs/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ApproveRun>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    let actor = read_actor(correlation_id, &headers)?;
    let command = read_json(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        run_id,
        account_id = command.account_id,
        bank_account_id = command.bank_account_id,
        actor,
        "Approving payroll run"
    );
    respond(
        correlation_id,
        StatusCode::OK,
        state.orchestrator().approve(run_id, command, actor),
    )
}

/// Handler for POST /payroll-runs/:id/pay.
async fn pay_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<PayRun>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    let actor = read_actor(correlation_id, &headers)?;
    let command = read_json(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, run_id, actor, "Paying payroll run");
    respond(
        correlation_id,
        StatusCode::OK,
        state.orchestrator().pay(run_id, command, actor),
    )
}

/// Handler for POST /payroll-runs/:id/cancel.
///
/// The body is optional; without one the run is cancelled without a reason.
async fn cancel_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<CancelRun>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    let actor = read_actor(correlation_id, &headers)?;
    let command = match payload {
        Err(JsonRejection::MissingJsonContentType(_)) => CancelRun::default(),
        other => read_json(correlation_id, other)?,
    };
    info!(correlation_id = %correlation_id, run_id, actor, "Cancelling payroll run");
    respond(
        correlation_id,
        StatusCode::OK,
        state.orchestrator().cancel(run_id, command, actor),
    )
}

/// Handler for GET /payroll-runs/:id/cancellation-check.
async fn cancellation_check_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    respond(
        correlation_id,
        StatusCode::OK,
        state.orchestrator().cancellation_check(run_id),
    )
}

/// Handler for GET /payroll-runs/:id/payment-summary.
async fn payment_summary_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let run_id = read_run_id(correlation_id, path)?;
    respond(
        correlation_id,
        StatusCode::OK,
        state.orchestrator().payment_summary(run_id),
    )
}

/// Turns an operation result into a JSON response.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: PayrollResult<T>,
) -> HandlerResult {
    match result {
        Ok(body) => Ok((
            status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response()),
        Err(err) => Err(failure(correlation_id, err)),
    }
}

fn failure(correlation_id: Uuid, err: crate::error::PayrollError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn bad_request(error: ApiError) -> Response {
    ApiErrorResponse::bad_request(error).into_response()
}

/// Unwraps a JSON body, answering parse failures with a structured error.
fn read_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(bad_request(error))
}

fn read_query<T>(
    correlation_id: Uuid,
    params: Result<Query<T>, QueryRejection>,
) -> Result<T, Response> {
    params.map(|Query(params)| params).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
        bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

fn read_run_id(
    correlation_id: Uuid,
    path: Result<Path<u64>, PathRejection>,
) -> Result<u64, Response> {
    path.map(|Path(run_id)| run_id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid run id");
        bad_request(ApiError::validation_error(format!(
            "invalid payroll run id: {}",
            rejection.body_text()
        )))
    })
}

/// The acting user from the `x-user-id` header; 0 (system) when absent.
fn read_actor(correlation_id: Uuid, headers: &HeaderMap) -> Result<u64, Response> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(0);
    };
    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .ok_or_else(|| {
            warn!(correlation_id = %correlation_id, "Invalid user id header");
            bad_request(ApiError::validation_error(format!(
                "{} must be a non-negative integer",
                USER_ID_HEADER
            )))
        })
}
