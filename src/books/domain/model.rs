use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::{Identifiable, Persistent};
use crate::utils::date::serializer;

// BookEntity abstracts physical book in library management system and there can be
// many copies of the same book (same isbn) with different identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: i64,
    pub version: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub borrower_id: Option<i64>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self {
            book_id: 0,
            version: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            borrower_id: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // true if the record describes the same work (title and author) as the given one
    pub fn same_work(&self, title: &str, author: &str) -> bool {
        self.title == title && self.author == author
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Persistent for BookEntity {
    fn with_identity(&self, id: i64, version: i64) -> Self {
        let mut book = self.clone();
        book.book_id = id;
        book.version = version;
        book
    }
}

impl Book for BookEntity {
    fn borrower_id(&self) -> Option<i64> {
        self.borrower_id
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::Book;
    use crate::books::domain::model::BookEntity;
    use crate::core::domain::Persistent;
    use crate::core::library::BookStatus;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("isbn", "title", "author");
        assert_eq!("isbn", book.isbn.as_str());
        assert_eq!("title", book.title.as_str());
        assert_eq!("author", book.author.as_str());
        assert_eq!(0, book.book_id);
        assert_eq!(BookStatus::Available, book.status());
    }

    #[tokio::test]
    async fn test_should_track_borrower() {
        let mut book = BookEntity::new("isbn", "title", "author").with_identity(4, 2);
        assert_eq!(4, book.book_id);
        assert_eq!(2, book.version);
        book.borrower_id = Some(9);
        assert_eq!(BookStatus::Borrowed(9), book.status());
        assert!(book.is_borrowed());
        assert!(book.is_borrowed_by(9));
        assert!(!book.is_borrowed_by(8));
    }

    #[tokio::test]
    async fn test_should_compare_works() {
        let book = BookEntity::new("isbn", "Clean Code", "Martin");
        assert!(book.same_work("Clean Code", "Martin"));
        assert!(!book.same_work("Clean Code", "Fowler"));
        assert!(!book.same_work("Refactoring", "Martin"));
    }
}
