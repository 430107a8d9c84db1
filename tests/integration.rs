//! Integration tests for the payroll engine.
//!
//! This test suite covers:
//! - The full generate, approve, pay lifecycle through the HTTP router
//! - Duplicate periods, invalid periods and missing salaries
//! - Account, bank account and cost center validation on approval
//! - Cancellation of draft, approved and paid runs
//! - Draft editing, listing, totals, preview and payment summaries
//! - Ledger failures during approval and payment
//! - Partial item failures during generation (property-based)

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use payroll_engine::api::{AppState, USER_ID_HEADER, create_router};
use payroll_engine::config::{ConfigLoader, PayrollSettings};
use payroll_engine::error::{PayrollError, PayrollResult};
use payroll_engine::ledger::{InMemoryLedger, LedgerGateway};
use payroll_engine::models::{
    AccountStatus, ActiveStatus, ConfirmEntry, LedgerEntry, LedgerEntryStatus, NewLedgerEntry,
    RunStatus, SalaryRecord,
};
use payroll_engine::orchestrator::{ApproveRun, GenerateRun, PayrollOrchestrator};
use payroll_engine::reporting::PayrollQueries;
use payroll_engine::repository::{InMemoryPayrollRepository, PayrollRepository};
use payroll_engine::salary::InMemorySalaryStore;

// =============================================================================
// Test Helpers
// =============================================================================

// Seeded chart (config/seed): account 1 is synthetic, 3 is the salaries
// account, 5 is inactive; bank account 3 and cost center 3 are inactive.
const SYNTHETIC_ACCOUNT: u64 = 1;
const SALARY_ACCOUNT: u64 = 3;
const PAYROLL_BANK: u64 = 2;
const CLOSED_BANK: u64 = 3;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config").expect("Failed to load config")
}

fn create_router_for_test() -> Router {
    create_router(AppState::from_config(&load_config()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized either as a string or a number.
fn decimal_at(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        Value::Number(n) => decimal(&n.to_string()),
        other => panic!("not a decimal: {}", other),
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(USER_ID_HEADER, "7");
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, json)
}

async fn generate(router: &Router, month: u32, year: i32) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/payroll-runs",
        Some(json!({ "month": month, "year": year })),
    )
    .await
}

async fn generate_january(router: &Router) -> u64 {
    let (status, body) = generate(router, 1, 2024).await;
    assert_eq!(status, StatusCode::CREATED, "generation failed: {}", body);
    body["run"]["id"].as_u64().unwrap()
}

async fn approve(router: &Router, run_id: u64, body: Value) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        &format!("/payroll-runs/{}/approve", run_id),
        Some(body),
    )
    .await
}

fn valid_approval() -> Value {
    json!({
        "account_id": SALARY_ACCOUNT,
        "bank_account_id": PAYROLL_BANK,
        "cost_center_id": 1
    })
}

fn entry_statuses(run: &Value) -> Vec<String> {
    run["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["ledger_entry"]["status"].as_str().unwrap().to_string())
        .collect()
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["code"], code, "unexpected error body: {}", body);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_generate_approve_pay_lifecycle() {
    let router = create_router_for_test();

    // Two salaries are effective in January 2024: 5000 and 3000.
    let (status, body) = generate(&router, 1, 2024).await;
    assert_eq!(status, StatusCode::CREATED);
    let run = &body["run"];
    let run_id = run["id"].as_u64().unwrap();
    assert_eq!(run["status"], "draft");
    assert_eq!(run["reference_month"], 1);
    assert_eq!(run["reference_year"], 2024);
    assert_eq!(run["created_by"], 7);
    assert_eq!(decimal_at(&run["total_amount"]), decimal("8000"));
    assert_eq!(run["items"].as_array().unwrap().len(), 2);
    assert!(body["failures"].as_array().unwrap().is_empty());

    let (status, approved) = approve(&router, run_id, valid_approval()).await;
    assert_eq!(status, StatusCode::OK, "approval failed: {}", approved);
    assert_eq!(approved["status"], "approved");
    assert_eq!(entry_statuses(&approved), vec!["pending", "pending"]);

    let (status, paid) = send(
        &router,
        "POST",
        &format!("/payroll-runs/{}/pay", run_id),
        Some(json!({
            "bank_account_id": PAYROLL_BANK,
            "payment_method": "pix",
            "payment_date": "2024-02-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "payment failed: {}", paid);
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["payment_date"], "2024-02-05");
    assert_eq!(entry_statuses(&paid), vec!["confirmed", "confirmed"]);
    for item in paid["items"].as_array().unwrap() {
        assert_eq!(item["ledger_entry"]["payment_method"], "pix");
        assert_eq!(
            decimal_at(&item["ledger_entry"]["amount"]),
            decimal_at(&item["gross_amount"])
        );
    }

    let (status, body) = send(
        &router,
        "POST",
        &format!("/payroll-runs/{}/cancel", run_id),
        Some(json!({ "reason": "too late" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "CANNOT_CANCEL_PAID_RUN");

    let (status, summary) = send(
        &router,
        "GET",
        &format!("/payroll-runs/{}/payment-summary", run_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["confirmed_items"], 2);
    assert_eq!(summary["pending_items"], 0);
    assert_eq!(decimal_at(&summary["confirmed_amount"]), decimal("8000"));
}

#[tokio::test]
async fn test_duplicate_period_rejected() {
    let router = create_router_for_test();
    generate_january(&router).await;

    let (status, body) = generate(&router, 1, 2024).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "DUPLICATE_PERIOD");
}

#[tokio::test]
async fn test_invalid_periods_rejected() {
    let router = create_router_for_test();

    for (month, year) in [(13, 2024), (0, 2024), (5, 2019), (1, 2999)] {
        let (status, body) = generate(&router, month, year).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}/{}", month, year);
        assert_error(&body, "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_period_without_salaries() {
    let router = create_router_for_test();

    let (status, body) = generate(&router, 1, 2020).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "NO_ELIGIBLE_EMPLOYEES");
}

#[tokio::test]
async fn test_salary_validity_window_respected() {
    let router = create_router_for_test();

    // December 2023: the third employee's salary is still effective, the
    // second one's already started in June.
    let (status, body) = generate(&router, 12, 2023).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["run"]["items"].as_array().unwrap().len(), 3);
    assert_eq!(
        decimal_at(&body["run"]["total_amount"]),
        decimal("12200")
    );
}

// =============================================================================
// Approval validation
// =============================================================================

#[tokio::test]
async fn test_approval_rejects_unusable_ledger_targets() {
    let router = create_router_for_test();
    let run_id = generate_january(&router).await;

    let (status, body) = approve(
        &router,
        run_id,
        json!({ "account_id": SYNTHETIC_ACCOUNT, "bank_account_id": PAYROLL_BANK }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "NON_LEAF_ACCOUNT");

    let (status, body) = approve(
        &router,
        run_id,
        json!({ "account_id": SALARY_ACCOUNT, "bank_account_id": CLOSED_BANK }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "INACTIVE_BANK_ACCOUNT");

    let (status, body) = approve(
        &router,
        run_id,
        json!({ "account_id": SALARY_ACCOUNT, "bank_account_id": PAYROLL_BANK, "cost_center_id": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, "INACTIVE_COST_CENTER");

    let (status, body) = approve(
        &router,
        run_id,
        json!({ "account_id": 999, "bank_account_id": PAYROLL_BANK }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOT_FOUND");

    // Nothing was created; the run is still an untouched draft.
    let (_, run) = send(&router, "GET", &format!("/payroll-runs/{}", run_id), None).await;
    assert_eq!(run["status"], "draft");
    assert!(run["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["linked_ledger_entry_id"].is_null()));
}

#[tokio::test]
async fn test_pay_requires_approved_run() {
    let router = create_router_for_test();
    let run_id = generate_january(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/payroll-runs/{}/pay", run_id),
        Some(json!({ "bank_account_id": PAYROLL_BANK, "payment_method": "ted" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "INVALID_STATE_TRANSITION");
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_cancel_approved_run_cancels_entries_and_frees_period() {
    let router = create_router_for_test();
    let run_id = generate_january(&router).await;
    approve(&router, run_id, valid_approval()).await;

    let (status, check) = send(
        &router,
        "GET",
        &format!("/payroll-runs/{}/cancellation-check", run_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["can_cancel"], true);

    let (status, cancelled) = send(
        &router,
        "POST",
        &format!("/payroll-runs/{}/cancel", run_id),
        Some(json!({ "reason": "wrong cost center" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(entry_statuses(&cancelled), vec!["cancelled", "cancelled"]);
    assert!(cancelled["notes"]
        .as_str()
        .unwrap()
        .ends_with("wrong cost center"));

    let (status, _) = generate(&router, 1, 2024).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancel_without_body() {
    let router = create_router_for_test();
    let run_id = generate_january(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/payroll-runs/{}/cancel", run_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, body) = send(
        &router,
        "POST",
        &format!("/payroll-runs/{}/cancel", run_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "INVALID_STATE_TRANSITION");
}

// =============================================================================
// Drafts, queries and request errors
// =============================================================================

#[tokio::test]
async fn test_edit_and_delete_draft() {
    let router = create_router_for_test();
    let run_id = generate_january(&router).await;
    let uri = format!("/payroll-runs/{}", run_id);

    let (status, updated) = send(
        &router,
        "PATCH",
        &uri,
        Some(json!({ "payment_date": "2024-02-05", "notes": "  first run  " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["payment_date"], "2024-02-05");
    assert_eq!(updated["notes"], "first run");

    let (status, cleared) = send(&router, "PATCH", &uri, Some(json!({ "notes": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["notes"].is_null());
    assert_eq!(cleared["payment_date"], "2024-02-05");

    let (status, body) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send(&router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOT_FOUND");
}

#[tokio::test]
async fn test_approved_run_is_not_editable() {
    let router = create_router_for_test();
    let run_id = generate_january(&router).await;
    approve(&router, run_id, valid_approval()).await;

    let (status, body) = send(
        &router,
        "DELETE",
        &format!("/payroll-runs/{}", run_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "RUN_NOT_EDITABLE");
}

#[tokio::test]
async fn test_list_filters_and_totals() {
    let router = create_router_for_test();
    let january = generate_january(&router).await;
    generate(&router, 2, 2024).await;
    generate(&router, 3, 2024).await;
    approve(&router, january, valid_approval()).await;

    let (status, page) = send(&router, "GET", "/payroll-runs?status=draft&per_page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    // Newest period first by default.
    assert_eq!(page["items"][0]["reference_month"], 3);

    let (status, page) = send(
        &router,
        "GET",
        "/payroll-runs?year=2024&sort_by=period&order=asc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"][0]["id"], january);

    let (status, totals) = send(&router, "GET", "/payroll-runs/totals", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["draft"]["count"], 2);
    assert_eq!(totals["approved"]["count"], 1);
    assert_eq!(decimal_at(&totals["approved"]["total_amount"]), decimal("8000"));
    assert_eq!(totals["paid"]["count"], 0);

    let (status, body) = send(&router, "GET", "/payroll-runs?status=archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_preview_has_no_side_effects() {
    let router = create_router_for_test();

    let (status, preview) = send(&router, "GET", "/payroll-runs/preview?month=1&year=2024", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["head_count"], 2);
    assert_eq!(preview["period_label"], "January/2024");
    assert_eq!(decimal_at(&preview["total_amount"]), decimal("8000"));

    let (_, page) = send(&router, "GET", "/payroll-runs", None).await;
    assert_eq!(page["total"], 0);

    let (status, _) = send(&router, "GET", "/payroll-runs/preview?month=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_requests() {
    let router = create_router_for_test();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll-runs")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_error(&body, "MALFORMED_JSON");

    let (status, body) = send(&router, "POST", "/payroll-runs", Some(json!({ "month": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_ERROR");

    let (status, body) = send(&router, "GET", "/payroll-runs/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_ERROR");
}

// =============================================================================
// Ledger failures
// =============================================================================

/// A ledger that starts failing after a number of successful calls.
struct FailingLedger {
    inner: InMemoryLedger,
    creates_left: AtomicUsize,
    confirms_left: AtomicUsize,
}

impl FailingLedger {
    fn new(creates: usize, confirms: usize) -> Self {
        Self {
            inner: load_config().build_ledger(),
            creates_left: AtomicUsize::new(creates),
            confirms_left: AtomicUsize::new(confirms),
        }
    }

    fn take(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

impl LedgerGateway for FailingLedger {
    fn create_entry(&self, entry: NewLedgerEntry) -> PayrollResult<u64> {
        if !Self::take(&self.creates_left) {
            return Err(PayrollError::ledger("ledger unavailable"));
        }
        self.inner.create_entry(entry)
    }

    fn confirm_entry(&self, entry_id: u64, confirmation: &ConfirmEntry) -> PayrollResult<()> {
        if !Self::take(&self.confirms_left) {
            return Err(PayrollError::ledger("ledger unavailable"));
        }
        self.inner.confirm_entry(entry_id, confirmation)
    }

    fn cancel_entry(&self, entry_id: u64, note: Option<&str>) -> PayrollResult<()> {
        self.inner.cancel_entry(entry_id, note)
    }

    fn entry(&self, entry_id: u64) -> PayrollResult<Option<LedgerEntry>> {
        self.inner.entry(entry_id)
    }

    fn validate_account(&self, account_id: u64) -> PayrollResult<Option<AccountStatus>> {
        self.inner.validate_account(account_id)
    }

    fn validate_bank_account(&self, bank_account_id: u64) -> PayrollResult<Option<ActiveStatus>> {
        self.inner.validate_bank_account(bank_account_id)
    }

    fn validate_cost_center(&self, cost_center_id: u64) -> PayrollResult<Option<ActiveStatus>> {
        self.inner.validate_cost_center(cost_center_id)
    }
}

fn router_with_ledger(ledger: Arc<FailingLedger>) -> Router {
    let config = load_config();
    let repository: Arc<dyn PayrollRepository> = Arc::new(InMemoryPayrollRepository::new());
    let orchestrator = PayrollOrchestrator::new(
        repository.clone(),
        ledger.clone(),
        Arc::new(config.build_salary_store()),
        config.settings().clone(),
    );
    let queries = PayrollQueries::new(repository, ledger, config.settings().clone());
    create_router(AppState::new(orchestrator, queries))
}

#[tokio::test]
async fn test_ledger_failure_during_approval_leaves_draft() {
    let ledger = Arc::new(FailingLedger::new(1, usize::MAX));
    let router = router_with_ledger(ledger.clone());
    let run_id = generate_january(&router).await;

    let (status, body) = approve(&router, run_id, valid_approval()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_error(&body, "LEDGER_GATEWAY_ERROR");

    let (_, run) = send(&router, "GET", &format!("/payroll-runs/{}", run_id), None).await;
    assert_eq!(run["status"], "draft");
    assert!(run["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["linked_ledger_entry_id"].is_null()));

    // The one entry created before the failure was compensated.
    let entries = ledger.inner.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, LedgerEntryStatus::Cancelled);
}

#[tokio::test]
async fn test_ledger_failure_during_payment_leaves_approved() {
    let ledger = Arc::new(FailingLedger::new(usize::MAX, 1));
    let router = router_with_ledger(ledger.clone());
    let run_id = generate_january(&router).await;
    approve(&router, run_id, valid_approval()).await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/payroll-runs/{}/pay", run_id),
        Some(json!({ "bank_account_id": PAYROLL_BANK, "payment_method": "bank_transfer" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_error(&body, "LEDGER_GATEWAY_ERROR");

    let (_, run) = send(&router, "GET", &format!("/payroll-runs/{}", run_id), None).await;
    assert_eq!(run["status"], "approved");
    assert_eq!(entry_statuses(&run), vec!["confirmed", "pending"]);
}

// =============================================================================
// Generation with partial failures (property-based)
// =============================================================================

fn orchestrator_for(amounts: &[i64]) -> PayrollOrchestrator {
    let records = amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| SalaryRecord {
            id: index as u64 + 1,
            employee_id: index as u64 + 1,
            employee_name: format!("Employee {}", index + 1),
            gross_amount: Decimal::new(*amount, 2),
            effective_from: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            effective_until: None,
            active: true,
        })
        .collect();
    PayrollOrchestrator::new(
        Arc::new(InMemoryPayrollRepository::new()),
        Arc::new(InMemoryLedger::new()),
        Arc::new(InMemorySalaryStore::new(records)),
        PayrollSettings::default(),
    )
}

proptest! {
    #[test]
    fn prop_generation_keeps_valid_items(amounts in prop::collection::vec(-50_000i64..1_000_000, 1..25)) {
        let orchestrator = orchestrator_for(&amounts);
        let outcome = orchestrator
            .generate(
                GenerateRun { month: 6, year: 2024, payment_date: None, notes: None },
                1,
            )
            .unwrap();

        let valid: Vec<Decimal> = amounts
            .iter()
            .filter(|amount| **amount > 0)
            .map(|amount| Decimal::new(*amount, 2))
            .collect();
        let expected_total: Decimal = valid.iter().sum();

        prop_assert_eq!(outcome.run.items.len(), valid.len());
        prop_assert_eq!(outcome.failure_count(), amounts.len() - valid.len());
        prop_assert_eq!(outcome.run.run.total_amount, expected_total);
        prop_assert_eq!(outcome.run.items_total(), expected_total);
        prop_assert_eq!(outcome.run.run.status, RunStatus::Draft);
    }
}

#[test]
fn test_approving_empty_generated_run_is_rejected() {
    let orchestrator = orchestrator_for(&[0, -100]);
    let outcome = orchestrator
        .generate(
            GenerateRun {
                month: 6,
                year: 2024,
                payment_date: None,
                notes: None,
            },
            1,
        )
        .unwrap();
    assert_eq!(outcome.failure_count(), 2);

    let result = orchestrator.approve(
        outcome.run.run.id,
        ApproveRun {
            account_id: SALARY_ACCOUNT,
            bank_account_id: PAYROLL_BANK,
            cost_center_id: None,
            notes: None,
        },
        1,
    );
    assert!(matches!(result, Err(PayrollError::Validation { .. })));
}
