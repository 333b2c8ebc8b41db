//! `ApiClient` against a mock backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use uni_auth::{CredentialProvider, MemoryCredentials, SessionCredentials, TokenPair};
use uni_config::ApiConfig;
use uni_core::entities::{Budget, Grade, Transaction};
use uni_forms::{BudgetForm, FormController, GradeForm, TransactionForm};
use uni_client::{ApiClient, ListQuery, NETWORK_ERROR, VALIDATION_FAILED};
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("UNIDESK_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_test_writer()
        .try_init();
}

fn api_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", server.uri()),
        ..Default::default()
    }
}

fn session_client(server: &MockServer) -> ApiClient<Arc<SessionCredentials>> {
    init_tracing();
    let api = api_for(server);
    let session = Arc::new(SessionCredentials::new(&api).expect("session"));
    session.set_tokens(TokenPair::new("old", "refresh-1"));
    ApiClient::new(api, session).expect("client")
}

fn memory_client(server: &MockServer) -> ApiClient<MemoryCredentials> {
    init_tracing();
    let creds = MemoryCredentials::new(Some(TokenPair::new("access-1", "refresh-1")));
    ApiClient::new(api_for(server), creds).expect("client")
}

async fn mount_refresh(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students/"))
        .and(header("authorization", "Bearer old"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Given token not valid for any token type"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, json!({"access": "new"})).await;
    Mock::given(method("GET"))
        .and(path("/api/students/"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"id": 1, "student_id": "STU001", "first_name": "Amira", "last_name": "Ben Salah"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = session_client(&server);
    let students = client.list_students(&ListQuery::new()).await.expect("students");

    assert_eq!(students.total, 1);
    assert_eq!(students.items[0].student_id, "STU001");
    assert_eq!(client.credentials().access_token().as_deref(), Some("new"));
}

#[tokio::test]
async fn failed_refresh_clears_session_and_surfaces_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/courses/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 401, json!({"detail": "Token is invalid or expired"})).await;

    let client = session_client(&server);
    let failure = client.list_courses(&ListQuery::new()).await.unwrap_err();

    assert!(failure.is_unauthorized());
    assert_eq!(failure.detail_text().as_deref(), Some("expired"));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn second_401_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teachers/3/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "nope"})))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, json!({"access": "new"})).await;

    let client = session_client(&server);
    let failure = client.teacher(3).await.unwrap_err();

    assert!(failure.is_unauthorized());
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn memory_credentials_are_cleared_on_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/exams/exams/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let failure = client.list_exams(&ListQuery::new()).await.unwrap_err();

    assert_eq!(failure.status, Some(401));
    assert_eq!(client.credentials().tokens(), None);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    init_tracing();
    let api = ApiConfig {
        base_url: "http://127.0.0.1:1/api".into(),
        timeout_secs: 5,
        ..Default::default()
    };
    let client = ApiClient::new(api, MemoryCredentials::default()).expect("client");

    let failure = client.list_students(&ListQuery::new()).await.unwrap_err();
    assert!(failure.is_network_error);
    assert_eq!(failure.error, NETWORK_ERROR);
    assert_eq!(failure.status, None);
}

#[tokio::test]
async fn field_errors_are_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grades/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "non_field_errors": ["Une note existe déjà pour cet étudiant dans ce cours."]
        })))
        .mount(&server)
        .await;

    let mut form = GradeForm::new();
    form.set("student", "12");
    form.set("course", "5");
    form.set("score", "14");
    form.set("academic_year", "2024");

    let client = memory_client(&server);
    let failure = client.create_grade(&form).await.unwrap_err();

    assert_eq!(failure.status, Some(400));
    assert_eq!(
        failure.field_errors().get("non_field_errors").map(String::as_str),
        Some("Une note existe déjà pour cet étudiant dans ce cours.")
    );
}

#[tokio::test]
async fn invalid_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let failure = client.create_grade(&GradeForm::new()).await.unwrap_err();

    assert!(failure.validation_error);
    assert_eq!(failure.error, VALIDATION_FAILED);
    assert!(failure.field_errors().contains_key("score"));
}

#[tokio::test]
async fn bulk_grades_report_row_errors() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut good = GradeForm::new();
    good.set("student", "1");
    good.set("course", "2");
    good.set("score", "15");
    let mut bad = good.clone();
    bad.set("score", "25");

    let client = memory_client(&server);
    let failure = client.bulk_create_grades(&[good, bad]).await.unwrap_err();

    let fields = failure.field_errors();
    assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["1.score"]);
}

#[tokio::test]
async fn login_is_anonymous_and_stores_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/accounts/token/"))
        .and(body_json(json!({"username": "admin", "password": "secret123"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a-2", "refresh": "r-2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let tokens = client.login("admin", "secret123").await.expect("login");

    assert_eq!(tokens, TokenPair::new("a-2", "r-2"));
    assert_eq!(client.credentials().tokens(), Some(TokenPair::new("a-2", "r-2")));

    let requests = server.received_requests().await.expect("recording on");
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn refused_login_keeps_existing_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/accounts/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let failure = client.login("admin", "wrong").await.unwrap_err();

    assert!(failure.is_unauthorized());
    assert_eq!(client.credentials().access_token().as_deref(), Some("access-1"));
}

#[tokio::test]
async fn success_false_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/grades/summary/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Aucune note enregistrée"
        })))
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let failure = client.grade_summary().await.unwrap_err();
    assert_eq!(failure.error, "Aucune note enregistrée");
}

fn stored_transaction() -> Transaction {
    serde_json::from_value(json!({
        "id": 5,
        "transaction_number": "TRX-0005",
        "student": 3,
        "transaction_type": "tuition",
        "amount": "1500.00",
        "due_date": "2025-01-31",
        "status": "pending",
        "method": "bank_transfer",
        "description": "Frais d'inscription"
    }))
    .expect("transaction")
}

#[tokio::test]
async fn refused_put_falls_back_to_patch_with_changes() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/finance/transactions/5/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "transaction_number": ["Ce champ est requis."]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/finance/transactions/5/"))
        .and(body_json(json!({"description": "Frais révisés"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "amount": "1500.00",
            "description": "Frais révisés"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = TransactionForm::edit(&stored_transaction());
    form.set("description", "Frais révisés");

    let client = memory_client(&server);
    let updated = client.update_transaction(5, &form).await.expect("update");
    assert_eq!(updated.description, "Frais révisés");
}

#[tokio::test]
async fn put_failure_wins_when_patch_also_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/finance/transactions/5/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "PUT refusé"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/finance/transactions/5/"))
        .respond_with(
            ResponseTemplate::new(405).set_body_json(json!({"error": "PATCH refusé"})),
        )
        .mount(&server)
        .await;

    let mut form = TransactionForm::edit(&stored_transaction());
    form.set("amount", "1800");

    let client = memory_client(&server);
    let failure = client.update_transaction(5, &form).await.unwrap_err();
    assert_eq!(failure.error, "PUT refusé");
    assert_eq!(failure.status, Some(400));
}

#[tokio::test]
async fn unauthorized_put_is_not_retried_as_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/finance/transactions/5/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = TransactionForm::edit(&stored_transaction());
    form.set("description", "Frais révisés");

    let client = memory_client(&server);
    let failure = client.update_transaction(5, &form).await.unwrap_err();
    assert!(failure.is_unauthorized());
    assert_eq!(client.credentials().tokens(), None);
}

#[tokio::test]
async fn unreachable_put_is_not_retried_as_patch() {
    init_tracing();
    let api = ApiConfig {
        base_url: "http://127.0.0.1:1/api".into(),
        timeout_secs: 5,
        ..Default::default()
    };
    let creds = MemoryCredentials::new(Some(TokenPair::new("access-1", "refresh-1")));
    let client = ApiClient::new(api, creds).expect("client");

    let mut form = TransactionForm::edit(&stored_transaction());
    form.set("amount", "1800");

    let failure = client.update_transaction(5, &form).await.unwrap_err();
    assert!(failure.is_network_error);
    assert_eq!(failure.error, NETWORK_ERROR);
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn grade_update_sends_only_changed_fields() {
    let server = MockServer::start().await;
    let stored = json!({
        "id": 2, "student": 12, "course": 5, "score": "14.50",
        "semester": "spring", "academic_year": 2024, "comment": ""
    });
    Mock::given(method("PUT"))
        .and(path("/api/grades/2/"))
        .and(body_json(json!({"score": 15.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "student": 12, "course": 5, "score": "15.00",
            "semester": "spring", "academic_year": 2024, "comment": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let grade: Grade = serde_json::from_value(stored).expect("grade");
    let mut form = GradeForm::edit(&grade);
    form.set("score", "15");
    form.set("student", "13");

    let client = memory_client(&server);
    let updated = client.update_grade(2, &form).await.expect("update");
    assert_eq!(updated.score, Some(15.0));

    let requests = server.received_requests().await.expect("recording");
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert!(sent.get("student").is_none());
    assert!(sent.get("course").is_none());
}

fn stored_budget() -> serde_json::Value {
    json!({
        "id": 4,
        "department": "Informatique",
        "budget_type": "operational",
        "year": 2025,
        "allocated_amount": "150000.00",
        "spent_amount": "40000.00",
        "committed_amount": "5000.00",
        "remaining_amount": "105000.00",
        "description": "Fonctionnement",
        "is_active": true
    })
}

async fn mount_stored_budget(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/finance/budgets/4/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": stored_budget()})),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn budget_form_with_description(description: &str) -> BudgetForm {
    let budget: Budget = serde_json::from_value(stored_budget()).expect("budget");
    let mut form = BudgetForm::edit(&budget);
    form.set("description", description);
    form
}

#[tokio::test]
async fn budget_update_merges_form_over_stored_record() {
    let server = MockServer::start().await;
    mount_stored_budget(&server).await;
    let merged = json!({
        "id": 4,
        "department": "Informatique",
        "budget_type": "operational",
        "year": 2025,
        "allocated_amount": 150_000.0,
        "spent_amount": 40_000.0,
        "committed_amount": 5_000.0,
        "remaining_amount": "105000.00",
        "description": "Fonctionnement 2025",
        "is_active": true
    });
    Mock::given(method("PUT"))
        .and(path("/api/finance/budgets/4/"))
        .and(body_json(merged.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(merged))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4})))
        .expect(0)
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let updated = client
        .update_budget(4, &budget_form_with_description("Fonctionnement 2025"))
        .await
        .expect("update");
    assert_eq!(updated.description, "Fonctionnement 2025");
    assert_eq!(updated.allocated_amount, 150_000.0);
}

#[tokio::test]
async fn refused_budget_put_falls_back_to_patch() {
    let server = MockServer::start().await;
    mount_stored_budget(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/finance/budgets/4/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Données invalides"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/finance/budgets/4/"))
        .and(body_json(json!({"description": "Fonctionnement 2025"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "department": "Informatique",
            "allocated_amount": "150000.00",
            "description": "Fonctionnement 2025"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let updated = client
        .update_budget(4, &budget_form_with_description("Fonctionnement 2025"))
        .await
        .expect("update");
    assert_eq!(updated.description, "Fonctionnement 2025");
}

#[tokio::test]
async fn budget_toggle_patches_only_is_active() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/finance/budgets/4/"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "department": "Informatique",
            "is_active": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let budget = client.set_budget_active(4, false).await.expect("toggle");
    assert_eq!(budget.is_active, Some(false));
}

#[tokio::test]
async fn upcoming_exams_pass_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/exams/upcoming/"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 7, "title": "Analyse II"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let exams = client.upcoming_exams(3).await.expect("upcoming");
    assert_eq!(exams.items.len(), 1);
    assert_eq!(exams.items[0].id, Some(7));
}

#[tokio::test]
async fn finance_summary_fills_zero_figures_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/finance/transactions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "transaction_type": "tuition", "category": "income", "amount": "1000", "status": "paid"},
            {"id": 2, "transaction_type": "tuition", "category": "income", "amount": "400", "status": "pending"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/finance/statistics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"total_income": 5000, "pending_amount": 0, "overdue_amount": 0, "net_balance": 4200}
        })))
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let summary = client.finance_summary().await.expect("summary");

    assert_eq!(summary.total_revenue, 5000.0);
    assert_eq!(summary.pending_amount, 400.0);
    assert_eq!(summary.net_balance, 4200.0);
}

#[tokio::test]
async fn finance_summary_survives_statistics_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/finance/transactions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"id": 1, "transaction_type": "tuition", "category": "income", "amount": 800, "status": "paid"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/finance/statistics/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = memory_client(&server);
    let summary = client.finance_summary().await.expect("summary");
    assert_eq!(summary.total_revenue, 800.0);
    assert_eq!(summary.collection_rate, 100.0);
}
