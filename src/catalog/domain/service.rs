use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::borrowers::repository::BorrowerRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::{Configuration, require_field};
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::locks::KeyedLocks;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Arc<dyn BookRepository>,
    borrower_repository: Arc<dyn BorrowerRepository>,
    isbn_locks: KeyedLocks,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      book_repository: Arc<dyn BookRepository>,
                      borrower_repository: Arc<dyn BorrowerRepository>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            borrower_repository,
            isbn_locks: KeyedLocks::new(),
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn register_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        require_field("isbn", book.isbn.as_str())?;
        require_field("title", book.title.as_str())?;
        require_field("author", book.author.as_str())?;

        // held until the new copy is stored so a racing registration sees it
        let _isbn_guard = self.isbn_locks.lock(book.isbn.as_str()).await;
        let copies = self.book_repository.find_by_isbn(book.isbn.as_str()).await?;
        if copies.iter().any(|copy| !copy.same_work(book.title.as_str(), book.author.as_str())) {
            warn!(branch = %self.branch_id, isbn = %book.isbn, "rejected book with conflicting title or author");
            return Err(LibraryError::validation(
                "ISBN conflict: same ISBN must share title and author", Some(book.isbn.to_string())));
        }

        let mut entity = BookEntity::from(book);
        entity.book_id = 0;
        if let Some(borrower_id) = entity.borrower_id {
            if self.borrower_repository.find_by_id(borrower_id).await?.is_none() {
                return Err(LibraryError::not_found(
                    format!("borrower not found for {}", borrower_id).as_str()));
            }
        }

        let stored = self.book_repository.create(&entity).await?;
        info!(branch = %self.branch_id, book_id = stored.book_id, isbn = %stored.isbn,
            status = %stored.status(), "registered book");
        Ok(BookDto::from(&stored))
    }

    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        debug!(branch = %self.branch_id, count = books.len(), "listed books");
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn get_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.find_by_id(id).await?
            .map(|b| BookDto::from(&b))
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn get_books_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_by_isbn(isbn).await?;
        debug!(branch = %self.branch_id, isbn = %isbn, count = books.len(), "listed copies");
        Ok(books.iter().map(BookDto::from).collect())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            borrower_id: other.borrower_id,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id,
            borrower_id: other.borrower_id.filter(|id| *id != 0),
            ..BookEntity::new(other.isbn.as_str(), other.title.as_str(), other.author.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::domain::Book;
    use crate::books::dto::BookDto;
    use crate::books::factory::create_book_repository;
    use crate::books::repository::BookRepository;
    use crate::borrowers::domain::model::BorrowerEntity;
    use crate::borrowers::factory::create_borrower_repository;
    use crate::borrowers::repository::BorrowerRepository;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::create_catalog_service;
    use crate::core::domain::Configuration;
    use crate::core::library::{BookStatus, LibraryError};
    use crate::core::repository::RepositoryStore;

    async fn build_catalog() -> (Arc<dyn CatalogService>, Arc<dyn BookRepository>, Arc<dyn BorrowerRepository>) {
        let book_repo = create_book_repository(RepositoryStore::InMemory).await;
        let borrower_repo = create_borrower_repository(RepositoryStore::InMemory).await;
        let svc = create_catalog_service(&Configuration::new("test"), book_repo.clone(), borrower_repo.clone());
        (svc, book_repo, borrower_repo)
    }

    #[tokio::test]
    async fn test_should_register_available_book() {
        let (catalog_svc, _, _) = build_catalog().await;
        let book = catalog_svc.register_book(&BookDto::new("978-1", "Clean Code", "Martin")).await.expect("should register book");
        assert_eq!(1, book.book_id);
        assert_eq!(BookStatus::Available, book.status());

        let loaded = catalog_svc.get_book_by_id(book.book_id).await.expect("should return book");
        assert_eq!("978-1", loaded.isbn.as_str());
        assert_eq!("Clean Code", loaded.title.as_str());
        assert_eq!("Martin", loaded.author.as_str());
    }

    #[tokio::test]
    async fn test_should_register_copies_of_same_work() {
        let (catalog_svc, _, _) = build_catalog().await;
        let first = catalog_svc.register_book(&BookDto::new("978-1", "Clean Code", "Martin")).await.expect("should register book");
        let second = catalog_svc.register_book(&BookDto::new("978-1", "Clean Code", "Martin")).await.expect("should register copy");
        assert_ne!(first.book_id, second.book_id);
        assert_eq!(2, catalog_svc.get_books_by_isbn("978-1").await.expect("should return copies").len());
        assert_eq!(0, catalog_svc.get_books_by_isbn("978-2").await.expect("should return copies").len());
    }

    #[tokio::test]
    async fn test_should_reject_isbn_conflict() {
        let (catalog_svc, book_repo, _) = build_catalog().await;
        let _ = catalog_svc.register_book(&BookDto::new("X", "T1", "A")).await.expect("should register book");
        let res = catalog_svc.register_book(&BookDto::new("X", "T2", "A")).await;
        match res {
            Err(LibraryError::Validation { message, .. }) => assert!(message.contains("ISBN conflict")),
            other => panic!("unexpected {:?}", other),
        }
        let res = catalog_svc.register_book(&BookDto::new("X", "T1", "B")).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        assert_eq!(1, book_repo.find_all().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_reject_empty_fields() {
        let (catalog_svc, book_repo, _) = build_catalog().await;
        for book in [BookDto::new("", "T", "A"), BookDto::new("I", " ", "A"), BookDto::new("I", "T", "")] {
            let res = catalog_svc.register_book(&book).await;
            assert!(matches!(res, Err(LibraryError::Validation { .. })));
        }
        assert!(book_repo.find_all().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_register_book_with_borrower() {
        let (catalog_svc, _, borrower_repo) = build_catalog().await;
        let borrower = borrower_repo.create(&BorrowerEntity::new("a@b.com", "A")).await.expect("should create borrower");

        let book = catalog_svc.register_book(&BookDto::new("978-1", "Clean Code", "Martin")
            .with_borrower(Some(borrower.borrower_id))).await.expect("should register book");
        assert_eq!(BookStatus::Borrowed(borrower.borrower_id), book.status());

        let book = catalog_svc.register_book(&BookDto::new("978-1", "Clean Code", "Martin")
            .with_borrower(Some(0))).await.expect("should register book");
        assert_eq!(BookStatus::Available, book.status());
    }

    #[tokio::test]
    async fn test_should_reject_unknown_borrower() {
        let (catalog_svc, book_repo, _) = build_catalog().await;
        let res = catalog_svc.register_book(&BookDto::new("978-1", "Clean Code", "Martin")
            .with_borrower(Some(42))).await;
        match res {
            Err(LibraryError::NotFound { message }) => assert!(message.contains("borrower")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(book_repo.find_all().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_not_find_missing_book() {
        let (catalog_svc, _, _) = build_catalog().await;
        let res = catalog_svc.get_book_by_id(7).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
        assert!(catalog_svc.get_all_books().await.expect("should list").is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_keep_isbn_consistent_under_racing_registrations() {
        let (catalog_svc, _, _) = build_catalog().await;
        let mut handles = vec![];
        for i in 0..16 {
            let catalog_svc = catalog_svc.clone();
            handles.push(tokio::spawn(async move {
                let title = if i % 2 == 0 { "T1" } else { "T2" };
                catalog_svc.register_book(&BookDto::new("race", title, "A")).await
            }));
        }
        let mut registered = 0;
        for handle in handles {
            match handle.await.expect("task should finish") {
                Ok(_) => registered += 1,
                Err(err) => assert!(matches!(err, LibraryError::Validation { .. })),
            }
        }
        let copies = catalog_svc.get_books_by_isbn("race").await.expect("should return copies");
        assert_eq!(registered, copies.len());
        assert_eq!(8, copies.len());
        assert!(copies.iter().all(|b| b.title == copies[0].title));
    }
}
