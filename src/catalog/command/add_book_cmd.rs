use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) isbn: String,
    pub(crate) title: String,
    pub(crate) author: String,
    #[serde(default)]
    pub(crate) borrower_id: Option<i64>,
}

impl AddBookCommandRequest {
    #[cfg(test)]
    pub fn new(isbn: &str, title: &str, author: &str, borrower_id: Option<i64>) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            borrower_id,
        }
    }

    pub fn build_book(&self) -> BookDto {
        BookDto::new(self.isbn.as_str(), self.title.as_str(), self.author.as_str())
            .with_borrower(self.borrower_id)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.register_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
