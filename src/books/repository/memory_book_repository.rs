use async_trait::async_trait;
use chrono::Utc;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::LibraryResult;
use crate::core::memory::MemoryTable;
use crate::core::repository::Repository;

#[derive(Debug)]
pub(crate) struct MemoryBookRepository {
    table: MemoryTable<BookEntity>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self {
            table: MemoryTable::new("books"),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut book = entity.clone();
        book.updated_at = Utc::now().naive_utc();
        self.table.replace(&book).await
    }

    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.table.get(id).await)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.table.all().await)
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.table.filter(|b| b.isbn == isbn).await)
    }

    async fn find_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.table.filter(|b| b.borrower_id == Some(borrower_id)).await)
    }
}
