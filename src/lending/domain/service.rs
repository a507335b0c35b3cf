use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::borrowers::domain::model::BorrowerEntity;
use crate::borrowers::dto::BorrowerDto;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::domain::{Configuration, require_field};
use crate::core::library::{BookStatus, LibraryError, LibraryResult};
use crate::lending::domain::LendingService;

// reason code both book stores attach to a version-check failure
const STALE_VERSION: &str = "409";

pub(crate) struct LendingServiceImpl {
    branch_id: String,
    book_repository: Arc<dyn BookRepository>,
    borrower_repository: Arc<dyn BorrowerRepository>,
}

impl LendingServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      book_repository: Arc<dyn BookRepository>,
                      borrower_repository: Arc<dyn BorrowerRepository>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            borrower_repository,
        }
    }

    async fn load_borrower(&self, borrower_id: i64) -> LibraryResult<BorrowerEntity> {
        self.borrower_repository.find_by_id(borrower_id).await?.ok_or_else(|| {
            LibraryError::not_found(format!("borrower not found for {}", borrower_id).as_str())
        })
    }

    async fn load_book(&self, book_id: i64) -> LibraryResult<BookEntity> {
        self.book_repository.find_by_id(book_id).await?.ok_or_else(|| {
            LibraryError::not_found(format!("book not found for {}", book_id).as_str())
        })
    }

    // Reads the book, lets `transition` check the guard and set the new holder, then writes it
    // back with a version check. A lost race reloads the book so the guard sees the winner's write.
    // A stale version means another write landed, so the loop ends once the guard fails or ours lands.
    async fn update_holder<F>(&self, book_id: i64, transition: F) -> LibraryResult<BookEntity>
        where F: Fn(&mut BookEntity) -> LibraryResult<()> + Send + Sync {
        let mut attempt = 0;
        loop {
            let mut book = self.load_book(book_id).await?;
            transition(&mut book)?;
            match self.book_repository.update(&book).await {
                Err(LibraryError::CurrentlyUnavailable { message, reason_code, .. })
                if reason_code.as_deref() == Some(STALE_VERSION) => {
                    attempt += 1;
                    debug!(branch = %self.branch_id, book_id, attempt, message = %message,
                        "book changed concurrently, reloading");
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl LendingService for LendingServiceImpl {
    async fn register_borrower(&self, borrower: &BorrowerDto) -> LibraryResult<BorrowerDto> {
        require_field("email", borrower.email.as_str())?;
        require_field("name", borrower.name.as_str())?;

        let duplicate = || LibraryError::duplicate_email(
            format!("email already registered: {}", borrower.email).as_str());
        if self.borrower_repository.exists_by_email(borrower.email.as_str()).await? {
            warn!(branch = %self.branch_id, email = %borrower.email, "rejected duplicate borrower");
            return Err(duplicate());
        }
        let mut entity = BorrowerEntity::from(borrower);
        entity.borrower_id = 0;
        let stored = self.borrower_repository.create(&entity).await.map_err(|err| match err {
            LibraryError::DuplicateKey { .. } => duplicate(),
            other => other,
        })?;
        info!(branch = %self.branch_id, borrower_id = stored.borrower_id, "registered borrower");
        Ok(BorrowerDto::from(&stored))
    }

    async fn borrow_book(&self, borrower_id: i64, book_id: i64) -> LibraryResult<()> {
        let borrower = self.load_borrower(borrower_id).await?;
        let book = self.update_holder(book_id, |book| {
            if let BookStatus::Borrowed(holder) = book.status() {
                warn!(branch = %self.branch_id, book_id, borrower_id, holder, "rejected borrow of borrowed book");
                return Err(LibraryError::already_borrowed(
                    format!("book is already borrowed: {}", book_id).as_str()));
            }
            book.borrower_id = Some(borrower.borrower_id);
            Ok(())
        }).await?;
        info!(branch = %self.branch_id, book_id = book.book_id, borrower_id, "book borrowed");
        Ok(())
    }

    async fn return_book(&self, borrower_id: i64, book_id: i64) -> LibraryResult<()> {
        let borrower = self.load_borrower(borrower_id).await?;
        let book = self.update_holder(book_id, |book| {
            if !book.is_borrowed_by(borrower.borrower_id) {
                warn!(branch = %self.branch_id, book_id, borrower_id, status = %book.status(),
                    "rejected return of book not held by borrower");
                return Err(LibraryError::not_borrowed(
                    format!("book was not borrowed by this borrower: book {} borrower {}", book_id, borrower_id).as_str()));
            }
            book.borrower_id = None;
            Ok(())
        }).await?;
        info!(branch = %self.branch_id, book_id = book.book_id, borrower_id, "book returned");
        Ok(())
    }

    async fn get_all_borrowers(&self) -> LibraryResult<Vec<BorrowerDto>> {
        let borrowers = self.borrower_repository.find_all().await?;
        debug!(branch = %self.branch_id, count = borrowers.len(), "listed borrowers");
        Ok(borrowers.iter().map(BorrowerDto::from).collect())
    }

    async fn get_borrower_by_id(&self, id: i64) -> LibraryResult<BorrowerDto> {
        self.load_borrower(id).await.map(|b| BorrowerDto::from(&b))
    }

    async fn get_borrowed_books(&self, borrower_id: i64) -> LibraryResult<Vec<BookDto>> {
        let borrower = self.load_borrower(borrower_id).await?;
        let books = self.book_repository.find_by_borrower(borrower.borrower_id).await?;
        Ok(books.iter().map(BookDto::from).collect())
    }
}

impl From<&BorrowerEntity> for BorrowerDto {
    fn from(other: &BorrowerEntity) -> Self {
        Self {
            borrower_id: other.borrower_id,
            email: other.email.to_string(),
            name: other.name.to_string(),
        }
    }
}

impl From<&BorrowerDto> for BorrowerEntity {
    fn from(other: &BorrowerDto) -> Self {
        Self {
            borrower_id: other.borrower_id,
            ..BorrowerEntity::new(other.email.as_str(), other.name.as_str())
        }
    }
}
