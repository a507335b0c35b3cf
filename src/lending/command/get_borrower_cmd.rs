use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::borrowers::dto::BorrowerDto;
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;

pub(crate) struct GetBorrowerCommand {
    lending_service: Arc<dyn LendingService>,
}

impl GetBorrowerCommand {
    pub(crate) fn new(lending_service: Arc<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBorrowerCommandRequest {
    pub(crate) borrower_id: i64,
}

impl GetBorrowerCommandRequest {
    pub fn new(borrower_id: i64) -> Self {
        Self {
            borrower_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetBorrowerCommandResponse {
    pub borrower: BorrowerDto,
}

impl GetBorrowerCommandResponse {
    pub fn new(borrower: BorrowerDto) -> Self {
        Self {
            borrower,
        }
    }
}

#[async_trait]
impl Command<GetBorrowerCommandRequest, GetBorrowerCommandResponse> for GetBorrowerCommand {
    async fn execute(&self, req: GetBorrowerCommandRequest) -> Result<GetBorrowerCommandResponse, CommandError> {
        self.lending_service.get_borrower_by_id(req.borrower_id)
            .await.map_err(CommandError::from).map(GetBorrowerCommandResponse::new)
    }
}
