use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::domain::Configuration;
use crate::lending::domain::LendingService;
use crate::lending::domain::service::LendingServiceImpl;

pub(crate) fn create_lending_service(config: &Configuration,
                                     book_repository: Arc<dyn BookRepository>,
                                     borrower_repository: Arc<dyn BorrowerRepository>) -> Arc<dyn LendingService> {
    Arc::new(LendingServiceImpl::new(config, book_repository, borrower_repository))
}
