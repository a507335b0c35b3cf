use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;

pub(crate) struct BorrowBookCommand {
    lending_service: Arc<dyn LendingService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(lending_service: Arc<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub(crate) borrower_id: i64,
    pub(crate) book_id: i64,
}

impl BorrowBookCommandRequest {
    pub fn new(borrower_id: i64, book_id: i64) -> Self {
        Self {
            borrower_id,
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowBookCommandResponse {
    pub message: String,
}

impl BorrowBookCommandResponse {
    pub fn new() -> Self {
        Self {
            message: "Book borrowed successfully".to_string(),
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.lending_service.borrow_book(req.borrower_id, req.book_id)
            .await.map_err(CommandError::from).map(|_| BorrowBookCommandResponse::new())
    }
}
