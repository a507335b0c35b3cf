pub mod command {
    pub mod add_book_cmd;
    pub mod find_books_by_isbn_cmd;
    pub mod get_book_cmd;
    pub mod list_books_cmd;
}
pub mod controller;
pub mod domain;
pub mod factory;
