pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::borrowers::dto::BorrowerDto;
use crate::core::library::LibraryResult;

// LendingService registers borrowers and moves books between Available and Borrowed.
#[async_trait]
pub(crate) trait LendingService: Sync + Send {
    async fn register_borrower(&self, borrower: &BorrowerDto) -> LibraryResult<BorrowerDto>;
    async fn borrow_book(&self, borrower_id: i64, book_id: i64) -> LibraryResult<()>;
    async fn return_book(&self, borrower_id: i64, book_id: i64) -> LibraryResult<()>;
    async fn get_all_borrowers(&self) -> LibraryResult<Vec<BorrowerDto>>;
    async fn get_borrower_by_id(&self, id: i64) -> LibraryResult<BorrowerDto>;
    // books currently held by the borrower
    async fn get_borrowed_books(&self, borrower_id: i64) -> LibraryResult<Vec<BookDto>>;
}
