use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct FindBooksByIsbnCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl FindBooksByIsbnCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindBooksByIsbnCommandRequest {
    pub(crate) isbn: String,
}

impl FindBooksByIsbnCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FindBooksByIsbnCommandResponse {
    pub books: Vec<BookDto>,
}

impl FindBooksByIsbnCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<FindBooksByIsbnCommandRequest, FindBooksByIsbnCommandResponse> for FindBooksByIsbnCommand {
    async fn execute(&self, req: FindBooksByIsbnCommandRequest) -> Result<FindBooksByIsbnCommandResponse, CommandError> {
        self.catalog_service.get_books_by_isbn(req.isbn.as_str())
            .await.map_err(CommandError::from).map(FindBooksByIsbnCommandResponse::new)
    }
}
