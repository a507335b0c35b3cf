use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;

pub(crate) struct ReturnBookCommand {
    lending_service: Arc<dyn LendingService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(lending_service: Arc<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    pub(crate) borrower_id: i64,
    pub(crate) book_id: i64,
}

impl ReturnBookCommandRequest {
    pub fn new(borrower_id: i64, book_id: i64) -> Self {
        Self {
            borrower_id,
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub message: String,
}

impl ReturnBookCommandResponse {
    pub fn new() -> Self {
        Self {
            message: "Book returned successfully".to_string(),
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.lending_service.return_book(req.borrower_id, req.book_id)
            .await.map_err(CommandError::from).map(|_| ReturnBookCommandResponse::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::factory::create_book_repository;
    use crate::borrowers::dto::BorrowerDto;
    use crate::borrowers::factory::create_borrower_repository;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::lending::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::lending::factory::create_lending_service;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let book_repo = create_book_repository(RepositoryStore::InMemory).await;
        let svc = create_lending_service(&Configuration::new("test"), book_repo.clone(),
                                         create_borrower_repository(RepositoryStore::InMemory).await);
        let borrower = svc.register_borrower(&BorrowerDto::new("a@b.com", "A")).await.expect("should register borrower");
        let book = book_repo.create(&BookEntity::new("isbn", "title", "author")).await.expect("should create book");
        svc.borrow_book(borrower.borrower_id, book.book_id).await.expect("should borrow book");

        let cmd = ReturnBookCommand::new(svc);
        let res = cmd.execute(ReturnBookCommandRequest::new(borrower.borrower_id, book.book_id)).await.expect("should return book");
        assert_eq!("Book returned successfully", res.message.as_str());

        let res = cmd.execute(ReturnBookCommandRequest::new(borrower.borrower_id, book.book_id)).await;
        assert!(matches!(res, Err(CommandError::NotBorrowed { .. })));
    }
}
