use crate::core::library::BookStatus;

pub mod model;

// Book is implemented by every shape of a physical book that knows its holder
pub(crate) trait Book {
    fn borrower_id(&self) -> Option<i64>;

    fn status(&self) -> BookStatus {
        BookStatus::from(self.borrower_id())
    }

    #[cfg(test)]
    fn is_borrowed(&self) -> bool {
        self.borrower_id().is_some()
    }

    fn is_borrowed_by(&self, borrower_id: i64) -> bool {
        self.borrower_id() == Some(borrower_id)
    }
}
