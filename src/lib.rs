pub mod books;
pub mod borrowers;
pub mod catalog;
pub mod core;
pub mod lending;
pub mod utils;
