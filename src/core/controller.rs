use std::sync::Arc;
use std::time::Instant;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Json, Response};
use axum::routing::{get, post};
use axum::{BoxError, Router};
use axum::body::HttpBody;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::books::factory::create_book_repository;
use crate::borrowers::factory::create_borrower_repository;
use crate::catalog::controller::{add_book, find_book_by_id, find_books_by_isbn, list_books};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory::create_catalog_service;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::lending::controller::{add_borrower, borrow_book, borrowed_books, find_borrower_by_id, list_borrowers, return_book};
use crate::lending::domain::LendingService;
use crate::lending::factory::create_lending_service;

// AppState is shared by all request handlers; both services sit on the same two stores.
#[derive(Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) catalog_service: Arc<dyn CatalogService>,
    pub(crate) lending_service: Arc<dyn LendingService>,
}

impl AppState {
    pub(crate) fn new(config: Configuration,
                      catalog_service: Arc<dyn CatalogService>,
                      lending_service: Arc<dyn LendingService>) -> AppState {
        AppState {
            config,
            catalog_service,
            lending_service,
        }
    }

    pub async fn build(config: Configuration) -> AppState {
        let book_repo = create_book_repository(config.store).await;
        let borrower_repo = create_borrower_repository(config.store).await;
        let catalog_service = create_catalog_service(&config, book_repo.clone(), borrower_repo.clone());
        let lending_service = create_lending_service(&config, book_repo, borrower_repo);
        AppState::new(config, catalog_service, lending_service)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

pub type ServerError = (StatusCode, Json<ErrorResponse>);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse {
        code: "serialization".to_string(),
        message: format!("{}", err),
    }))
}

pub(crate) fn status_of(err: &CommandError) -> StatusCode {
    match err {
        CommandError::Access { .. } => StatusCode::BAD_REQUEST,
        CommandError::AlreadyBorrowed { .. } => StatusCode::CONFLICT,
        CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::DuplicateEmail { .. } => StatusCode::CONFLICT,
        CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
        CommandError::NotBorrowed { .. } => StatusCode::BAD_REQUEST,
        CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
        CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
        CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
        CommandError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        (status_of(&err), Json(ErrorResponse {
            code: err.code().to_string(),
            message: err.message().to_string(),
        }))
    }
}

// logs every request crossing the HTTP boundary; handlers and services log their own events
pub async fn log_request<B>(req: Request<B>, next: Next<B>) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();
    let res = next.run(req).await;
    info!(method = %method, path = %path, status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64, "handled request");
    res
}

// routes of the catalog and lending handlers over the shared state, generic over the
// request body so the same router serves the lambda runtime and direct calls
pub fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::<AppState, B>::new()
        .route("/api/books", post(add_book).get(list_books))
        .route("/api/books/:book_id", get(find_book_by_id))
        .route("/api/isbn/:isbn", get(find_books_by_isbn))
        .route("/api/borrowers", post(add_borrower).get(list_borrowers))
        .route("/api/borrowers/:borrower_id", get(find_borrower_by_id))
        .route("/api/borrowers/:borrower_id/books", get(borrowed_books))
        .route("/api/borrowers/:borrower_id/borrow/:book_id", post(borrow_book))
        .route("/api/borrowers/:borrower_id/return/:book_id", post(return_book))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use crate::core::command::CommandError;
    use crate::core::controller::{AppState, build_router, json_to_server_error, ServerError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_map_command_errors_to_status() {
        let cases = vec![
            (CommandError::Validation { message: "isbn".to_string(), reason_code: None }, StatusCode::BAD_REQUEST),
            (CommandError::NotBorrowed { message: "x".to_string() }, StatusCode::BAD_REQUEST),
            (CommandError::NotFound { message: "x".to_string() }, StatusCode::NOT_FOUND),
            (CommandError::AlreadyBorrowed { message: "x".to_string() }, StatusCode::CONFLICT),
            (CommandError::DuplicateEmail { message: "x".to_string() }, StatusCode::CONFLICT),
            (CommandError::DuplicateKey { message: "x".to_string() }, StatusCode::CONFLICT),
            (CommandError::Database { message: "x".to_string(), reason_code: None, retryable: false }, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let code = err.code();
            let (actual, body) = ServerError::from(err);
            assert_eq!(status, actual);
            assert_eq!(code, body.code.as_str());
        }
    }

    #[tokio::test]
    async fn test_should_map_json_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        let (status, body) = json_to_server_error(err);
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("serialization", body.code.as_str());
    }

    #[tokio::test]
    async fn test_should_route_requests() {
        let state = AppState::build(Configuration::new("test")).await;
        assert_eq!("test", state.config().branch_id.as_str());
        let app = build_router::<Body>(state);
        let cases = vec![
            ("POST", "/api/borrowers/1/borrow/1", "", StatusCode::NOT_FOUND),
            ("POST", "/api/books", r#"{"isbn": "978-1", "title": "Clean Code", "author": "Martin"}"#, StatusCode::CREATED),
            ("GET", "/api/isbn/978-1", "", StatusCode::OK),
            ("GET", "/api/books/1", "", StatusCode::OK),
            ("GET", "/api/books/abc", "", StatusCode::BAD_REQUEST),
            ("POST", "/api/borrowers", r#"{"email": "a@b.com", "name": "A"}"#, StatusCode::CREATED),
            ("POST", "/api/borrowers/1/borrow/1", "", StatusCode::OK),
            ("POST", "/api/borrowers/1/borrow/1", "", StatusCode::CONFLICT),
            ("GET", "/api/unknown", "", StatusCode::NOT_FOUND),
        ];
        for (method, uri, body, status) in cases {
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .expect("should build request");
            let res = app.clone().oneshot(req).await.expect("should route request");
            assert_eq!(status, res.status(), "{} {}", method, uri);
        }
    }
}
