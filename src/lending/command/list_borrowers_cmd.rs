use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::borrowers::dto::BorrowerDto;
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;

pub(crate) struct ListBorrowersCommand {
    lending_service: Arc<dyn LendingService>,
}

impl ListBorrowersCommand {
    pub(crate) fn new(lending_service: Arc<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListBorrowersCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct ListBorrowersCommandResponse {
    pub borrowers: Vec<BorrowerDto>,
}

impl ListBorrowersCommandResponse {
    pub fn new(borrowers: Vec<BorrowerDto>) -> Self {
        Self {
            borrowers,
        }
    }
}

#[async_trait]
impl Command<ListBorrowersCommandRequest, ListBorrowersCommandResponse> for ListBorrowersCommand {
    async fn execute(&self, _req: ListBorrowersCommandRequest) -> Result<ListBorrowersCommandResponse, CommandError> {
        self.lending_service.get_all_borrowers()
            .await.map_err(CommandError::from).map(ListBorrowersCommandResponse::new)
    }
}
