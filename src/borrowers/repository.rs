pub mod ddb_borrower_repository;
pub mod memory_borrower_repository;

use async_trait::async_trait;
use crate::borrowers::domain::model::BorrowerEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

// BorrowerRepository is the Borrower store. Inserts fail with DuplicateKey when the email is taken.
#[async_trait]
pub(crate) trait BorrowerRepository: Repository<BorrowerEntity> {
    async fn exists_by_email(&self, email: &str) -> LibraryResult<bool>;
}
