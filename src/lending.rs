pub mod command {
    pub mod add_borrower_cmd;
    pub mod borrow_book_cmd;
    pub mod borrowed_books_cmd;
    pub mod get_borrower_cmd;
    pub mod list_borrowers_cmd;
    pub mod return_book_cmd;
}
pub mod controller;
pub mod domain;
pub mod factory;
