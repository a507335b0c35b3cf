use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::lending::command::add_borrower_cmd::{AddBorrowerCommand, AddBorrowerCommandRequest, AddBorrowerCommandResponse};
use crate::lending::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
use crate::lending::command::borrowed_books_cmd::{BorrowedBooksCommand, BorrowedBooksCommandRequest, BorrowedBooksCommandResponse};
use crate::lending::command::get_borrower_cmd::{GetBorrowerCommand, GetBorrowerCommandRequest, GetBorrowerCommandResponse};
use crate::lending::command::list_borrowers_cmd::{ListBorrowersCommand, ListBorrowersCommandRequest, ListBorrowersCommandResponse};
use crate::lending::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};

pub(crate) async fn add_borrower(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<AddBorrowerCommandResponse>), ServerError> {
    let req: AddBorrowerCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBorrowerCommand::new(state.lending_service.clone()).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn list_borrowers(
    State(state): State<AppState>) -> Result<Json<ListBorrowersCommandResponse>, ServerError> {
    let res = ListBorrowersCommand::new(state.lending_service.clone()).execute(ListBorrowersCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn find_borrower_by_id(
    State(state): State<AppState>,
    Path(borrower_id): Path<i64>) -> Result<Json<GetBorrowerCommandResponse>, ServerError> {
    let req = GetBorrowerCommandRequest::new(borrower_id);
    let res = GetBorrowerCommand::new(state.lending_service.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn borrowed_books(
    State(state): State<AppState>,
    Path(borrower_id): Path<i64>) -> Result<Json<BorrowedBooksCommandResponse>, ServerError> {
    let req = BorrowedBooksCommandRequest::new(borrower_id);
    let res = BorrowedBooksCommand::new(state.lending_service.clone()).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn borrow_book(
    State(state): State<AppState>,
    Path((borrower_id, book_id)): Path<(i64, i64)>) -> Result<String, ServerError> {
    let req = BorrowBookCommandRequest::new(borrower_id, book_id);
    let res = BorrowBookCommand::new(state.lending_service.clone()).execute(req).await?;
    Ok(res.message)
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    Path((borrower_id, book_id)): Path<(i64, i64)>) -> Result<String, ServerError> {
    let req = ReturnBookCommandRequest::new(borrower_id, book_id);
    let res = ReturnBookCommand::new(state.lending_service.clone()).execute(req).await?;
    Ok(res.message)
}
