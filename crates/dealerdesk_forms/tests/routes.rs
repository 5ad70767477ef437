use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use dealerdesk_db::{
    DbError, FormSubmission, FormSubmissionRepository, FormType, InMemoryFormSubmissionRepository,
    NewFormSubmission,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Clone)]
struct FailingRepository;

impl FormSubmissionRepository for FailingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create(&self, _submission: NewFormSubmission) -> Result<FormSubmission, DbError> {
        Err(DbError::QueryError("database is locked".to_string()))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<FormSubmission>, DbError> {
        Ok(None)
    }

    async fn find_all(&self) -> Result<Vec<FormSubmission>, DbError> {
        Ok(Vec::new())
    }
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn customer_payload() -> Value {
    json!({
        "name": "Ada Okafor",
        "company": "Okafor Logistics",
        "email": "ada@okafor.example",
        "phone": "(555) 010-2020",
        "location": "Austin, TX",
        "type": "Business",
        "status": "Lead"
    })
}

#[tokio::test]
async fn vehicle_listing_is_stored() {
    let repo = InMemoryFormSubmissionRepository::new();
    let app = dealerdesk_forms::routes(repo.clone());

    let (status, body) = post_json(
        app,
        "/forms/vehicle",
        json!({
            "submissionType": "VEHICLE_LISTING",
            "payload": {"make": "Tesla", "model": "Model S", "contactEmail": "x@y.z"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["formType"], "VEHICLE_LISTING");
    let id = body["id"].as_str().unwrap();

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.form_type, FormType::VehicleListing);
    assert_eq!(stored.payload["features"], json!([]));
    assert_eq!(stored.payload["make"], "Tesla");
}

#[tokio::test]
async fn vehicle_update_echoes_update_type() {
    let app = dealerdesk_forms::routes(InMemoryFormSubmissionRepository::new());
    let (status, body) = post_json(
        app,
        "/forms/vehicle",
        json!({
            "submissionType": "VEHICLE_UPDATE",
            "payload": {"make": "Tesla", "model": "Model S", "contactEmail": "x@y.z"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["formType"], "VEHICLE_UPDATE");
}

#[tokio::test]
async fn missing_field_is_a_400_with_message() {
    let repo = InMemoryFormSubmissionRepository::new();
    let app = dealerdesk_forms::routes(repo.clone());
    let (status, body) = post_json(
        app,
        "/forms/vehicle",
        json!({"payload": {"make": "Tesla", "contactEmail": "x@y.z"}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "model is required"}));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn body_without_json_content_type_reports_missing_payload() {
    let app = dealerdesk_forms::routes(InMemoryFormSubmissionRepository::new());
    let response = app
        .oneshot(
            Request::post("/forms/customer")
                .body(Body::from("name=Ada"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "payload must be an object");
}

#[tokio::test]
async fn malformed_json_is_a_400() {
    let app = dealerdesk_forms::routes(InMemoryFormSubmissionRepository::new());
    let response = app
        .oneshot(
            Request::post("/forms/vehicle")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"payload\":"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn customer_is_stored() {
    let repo = InMemoryFormSubmissionRepository::new();
    let app = dealerdesk_forms::routes(repo.clone());
    let (status, body) = post_json(app, "/forms/customer", json!({"payload": customer_payload()})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["formType"], "CUSTOMER_CREATE");
    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].payload["name"], "Ada Okafor");
}

#[tokio::test]
async fn customer_with_blank_status_is_rejected() {
    let mut payload = customer_payload();
    payload["status"] = json!(" ");
    let app = dealerdesk_forms::routes(InMemoryFormSubmissionRepository::new());
    let (status, body) = post_json(app, "/forms/customer", json!({"payload": payload})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "status is required");
}

#[tokio::test]
async fn storage_failure_is_a_500() {
    let (status, body) = post_json(
        dealerdesk_forms::routes(FailingRepository),
        "/forms/vehicle",
        json!({"payload": {"make": "Tesla", "model": "Model S", "contactEmail": "x@y.z"}}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Unable to save vehicle form submission");

    let (status, body) = post_json(
        dealerdesk_forms::routes(FailingRepository),
        "/forms/customer",
        json!({"payload": customer_payload()}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Unable to save customer form submission");
}
