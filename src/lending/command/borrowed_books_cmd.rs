use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;

pub(crate) struct BorrowedBooksCommand {
    lending_service: Arc<dyn LendingService>,
}

impl BorrowedBooksCommand {
    pub(crate) fn new(lending_service: Arc<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowedBooksCommandRequest {
    pub(crate) borrower_id: i64,
}

impl BorrowedBooksCommandRequest {
    pub fn new(borrower_id: i64) -> Self {
        Self {
            borrower_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowedBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl BorrowedBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<BorrowedBooksCommandRequest, BorrowedBooksCommandResponse> for BorrowedBooksCommand {
    async fn execute(&self, req: BorrowedBooksCommandRequest) -> Result<BorrowedBooksCommandResponse, CommandError> {
        self.lending_service.get_borrowed_books(req.borrower_id)
            .await.map_err(CommandError::from).map(BorrowedBooksCommandResponse::new)
    }
}
