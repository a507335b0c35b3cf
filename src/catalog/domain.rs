pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

// CatalogService registers physical books and answers catalog lookups.
#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    // registers one physical copy; a non-zero borrower_id creates it already borrowed
    async fn register_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn get_book_by_id(&self, id: i64) -> LibraryResult<BookDto>;
    async fn get_books_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<BookDto>>;
}
