use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::domain::ExpenseService;
use crate::error::ExpenseError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
}

impl AppState {
    pub fn new(expense_service: ExpenseService) -> Self {
        Self { expense_service }
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState, cors_origin: HeaderValue) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/expenses", post(create_expense))
        .route("/expenses/:user_id/:month", get(list_expenses));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "Backend is running"
}

/// Axum handler function for POST /api/expenses
///
/// Every failure answers 400; the body's `kind` still tells validation and
/// storage failures apart.
pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            error!("POST /api/expenses - unreadable body: {}", rejection.body_text());
            return ExpenseError::validation(rejection.body_text()).into_response();
        }
    };

    info!("POST /api/expenses - payload: {}", payload);

    match state.expense_service.create_expense(&payload).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => {
            error!("Failed to create expense: {}", e);
            e.into_response_with_status(StatusCode::BAD_REQUEST)
        }
    }
}

/// Axum handler function for GET /api/expenses/:user_id/:month
pub async fn list_expenses(
    State(state): State<AppState>,
    Path((user_id, month)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/expenses/{}/{}", user_id, month);

    match state.expense_service.list_expenses(&user_id, &month).await {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => {
            error!("Failed to list expenses: {}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use shared::{ErrorKind, ErrorResponse, Expense};
    use tower::ServiceExt;

    async fn setup_test_state() -> AppState {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppState::new(ExpenseService::new(db))
    }

    fn unreachable_state() -> AppState {
        let db = DbConnection::connect_lazy("sqlite:/nonexistent-expense-tracker/dir/expenses.db")
            .expect("Lazy pool should build");
        AppState::new(ExpenseService::new(db))
    }

    fn test_router(state: AppState) -> Router {
        create_router(state, HeaderValue::from_static("http://localhost:8080"))
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/expenses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn lunch() -> Value {
        json!({
            "userId": "u1",
            "month": "2024-01",
            "category": "Food",
            "amount": 50,
            "description": "lunch"
        })
    }

    #[tokio::test]
    async fn test_create_expense_handler() {
        let state = setup_test_state().await;

        let response = create_expense(State(state), Ok(Json(lunch()))).await;

        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_expense_validation_error() {
        let state = setup_test_state().await;

        let mut payload = lunch();
        payload["amount"] = json!({"value": 50});
        let response = create_expense(State(state), Ok(Json(payload))).await;

        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_expenses_handler_empty() {
        let state = setup_test_state().await;

        let response = list_expenses(
            State(state),
            Path(("u1".to_string(), "2024-01".to_string())),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let expenses: Vec<Expense> = read_json(response).await;
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_query_over_http() {
        let app = test_router(setup_test_state().await);

        let response = app
            .clone()
            .oneshot(post_json(lunch().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Expense = read_json(response).await;
        assert!(!created.id.is_empty());
        assert_eq!(created.description.as_deref(), Some("lunch"));

        let response = app.oneshot(get_request("/api/expenses/u1/2024-01")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Vec<Expense> = read_json(response).await;
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_created_record_json_shape() {
        let app = test_router(setup_test_state().await);

        let response = app.oneshot(post_json(lunch().to_string())).await.unwrap();
        let body: Value = read_json(response).await;

        assert!(body["id"].is_string());
        assert_eq!(body["userId"], "u1");
        assert_eq!(body["amount"], 50.0);
        assert!(body["date"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = test_router(setup_test_state().await);

        let response = app.oneshot(post_json("{\"userId\": ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.kind, ErrorKind::Validation);
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_uncoercible_amount_is_bad_request() {
        let app = test_router(setup_test_state().await);

        let mut payload = lunch();
        payload["amount"] = json!("abc");
        let response = app.oneshot(post_json(payload.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.kind, ErrorKind::Validation);
        assert!(body.error.contains("amount"));
    }

    #[tokio::test]
    async fn test_query_with_unreachable_store_is_server_error() {
        let app = test_router(unreachable_state());

        let response = app.oneshot(get_request("/api/expenses/u1/2024-01")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.kind, ErrorKind::StorageUnavailable);
    }

    #[tokio::test]
    async fn test_create_with_unreachable_store_is_bad_request() {
        let app = test_router(unreachable_state());

        let response = app.oneshot(post_json(lunch().to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.kind, ErrorKind::StorageUnavailable);
        assert!(body.error.starts_with("Storage unavailable"));
    }

    #[tokio::test]
    async fn test_far_future_date_is_rejected_and_month_stays_readable() {
        let app = test_router(setup_test_state().await);

        let response = app
            .clone()
            .oneshot(post_json(lunch().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Expense = read_json(response).await;

        let mut payload = lunch();
        payload["date"] = json!(253_402_300_800_000_i64);
        let response = app
            .clone()
            .oneshot(post_json(payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.kind, ErrorKind::Validation);

        let response = app.oneshot(get_request("/api/expenses/u1/2024-01")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Vec<Expense> = read_json(response).await;
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_last_four_digit_year_round_trips() {
        let app = test_router(setup_test_state().await);

        let mut payload = lunch();
        payload["date"] = json!("9999-12-31T23:59:59.999Z");
        let response = app
            .clone()
            .oneshot(post_json(payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Expense = read_json(response).await;

        let response = app.oneshot(get_request("/api/expenses/u1/2024-01")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Vec<Expense> = read_json(response).await;
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = test_router(setup_test_state().await);

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
