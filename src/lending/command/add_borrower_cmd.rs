use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::borrowers::dto::BorrowerDto;
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;

pub(crate) struct AddBorrowerCommand {
    lending_service: Arc<dyn LendingService>,
}

impl AddBorrowerCommand {
    pub(crate) fn new(lending_service: Arc<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBorrowerCommandRequest {
    pub(crate) email: String,
    pub(crate) name: String,
}

impl AddBorrowerCommandRequest {
    #[cfg(test)]
    pub fn new(email: &str, name: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBorrowerCommandResponse {
    pub borrower: BorrowerDto,
}

impl AddBorrowerCommandResponse {
    pub fn new(borrower: BorrowerDto) -> Self {
        Self {
            borrower,
        }
    }
}

#[async_trait]
impl Command<AddBorrowerCommandRequest, AddBorrowerCommandResponse> for AddBorrowerCommand {
    async fn execute(&self, req: AddBorrowerCommandRequest) -> Result<AddBorrowerCommandResponse, CommandError> {
        let borrower = BorrowerDto::new(req.email.as_str(), req.name.as_str());
        self.lending_service.register_borrower(&borrower).await.map_err(CommandError::from).map(AddBorrowerCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::factory::create_book_repository;
    use crate::borrowers::factory::create_borrower_repository;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::lending::command::add_borrower_cmd::{AddBorrowerCommand, AddBorrowerCommandRequest};
    use crate::lending::factory::create_lending_service;

    #[tokio::test]
    async fn test_should_run_add_borrower() {
        let svc = create_lending_service(&Configuration::new("test"),
                                         create_book_repository(RepositoryStore::InMemory).await,
                                         create_borrower_repository(RepositoryStore::InMemory).await);
        let cmd = AddBorrowerCommand::new(svc);
        let res = cmd.execute(AddBorrowerCommandRequest::new("a@b.com", "A")).await.expect("should add borrower");
        assert_eq!(1, res.borrower.borrower_id);

        let res = cmd.execute(AddBorrowerCommandRequest::new("a@b.com", "A")).await;
        assert!(matches!(res, Err(CommandError::DuplicateEmail { .. })));
    }
}
