use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::find_books_by_isbn_cmd::{FindBooksByIsbnCommand, FindBooksByIsbnCommandRequest, FindBooksByIsbnCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog_service.clone()).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let res = ListBooksCommand::new(state.catalog_service.clone()).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<i64>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest::new(book_id);
    let res = GetBookCommand::new(state.catalog_service.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_books_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<FindBooksByIsbnCommandResponse>, ServerError> {
    let req = FindBooksByIsbnCommandRequest::new(isbn.as_str());
    let res = FindBooksByIsbnCommand::new(state.catalog_service.clone()).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::Json;
    use serde_json::json;
    use crate::catalog::controller::{add_book, find_book_by_id, find_books_by_isbn, list_books};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_add_and_find_book() {
        let state = AppState::build(Configuration::new("test")).await;
        let (status, Json(res)) = add_book(State(state.clone()), Json(json!({
            "isbn": "978-1", "title": "Clean Code", "author": "Martin"
        }))).await.expect("should add book");
        assert_eq!(StatusCode::CREATED, status);
        assert_eq!(1, res.book.book_id);

        let Json(loaded) = find_book_by_id(State(state.clone()), Path(res.book.book_id)).await.expect("should find book");
        assert_eq!(res.book, loaded.book);

        let Json(copies) = find_books_by_isbn(State(state.clone()), Path("978-1".to_string())).await.expect("should find copies");
        assert_eq!(1, copies.books.len());

        let Json(all) = list_books(State(state)).await.expect("should list books");
        assert_eq!(1, all.books.len());
    }

    #[tokio::test]
    async fn test_should_map_catalog_errors() {
        let state = AppState::build(Configuration::new("test")).await;
        let (status, Json(body)) = add_book(State(state.clone()), Json(json!({"isbn": "978-1"})))
            .await.expect_err("should reject malformed book");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("serialization", body.code.as_str());

        let (status, Json(body)) = add_book(State(state.clone()), Json(json!({
            "isbn": "978-1", "title": "", "author": "Martin"
        }))).await.expect_err("should reject empty title");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("validation", body.code.as_str());

        let (status, Json(body)) = find_book_by_id(State(state), Path(5)).await.expect_err("should not find book");
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("not_found", body.code.as_str());
    }
}
