use serde::{Deserialize, Serialize};
use crate::books::domain::Book;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    #[serde(default)]
    pub book_id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub borrower_id: Option<i64>,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str) -> BookDto {
        BookDto {
            book_id: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            borrower_id: None,
        }
    }

    // a borrower id of zero means no borrower
    pub fn with_borrower(mut self, borrower_id: Option<i64>) -> BookDto {
        self.borrower_id = borrower_id.filter(|id| *id != 0);
        self
    }
}

impl Book for BookDto {
    fn borrower_id(&self) -> Option<i64> {
        self.borrower_id
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::Book;
    use crate::books::dto::BookDto;
    use crate::core::library::BookStatus;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookDto::new("isbn", "title", "author");
        assert_eq!("isbn", book.isbn.as_str());
        assert_eq!("title", book.title.as_str());
        assert_eq!("author", book.author.as_str());
        assert_eq!(BookStatus::Available, book.status());
    }

    #[tokio::test]
    async fn test_should_treat_zero_borrower_as_none() {
        assert_eq!(None, BookDto::new("i", "t", "a").with_borrower(Some(0)).borrower_id);
        assert_eq!(None, BookDto::new("i", "t", "a").with_borrower(None).borrower_id);
        assert_eq!(Some(3), BookDto::new("i", "t", "a").with_borrower(Some(3)).borrower_id);
    }
}
