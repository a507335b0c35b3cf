pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

// BookRepository is the Book store
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<BookEntity>>;

    async fn find_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<BookEntity>>;
}
