use std::sync::Arc;
use aws_sdk_dynamodb::types::ScalarAttributeType;
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_sequences_table, create_table};

pub(crate) async fn create_book_repository(store: RepositoryStore) -> Arc<dyn BookRepository> {
    match store {
        RepositoryStore::InMemory => {
            Arc::new(MemoryBookRepository::new())
        }
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBBookRepository::new(client, "books", "books_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "books", "book_id", ScalarAttributeType::N, Some(("isbn", "title"))).await;
            let _ = create_sequences_table(&client).await;
            Arc::new(DDBBookRepository::new(client, "books", "books_ndx"))
        }
    }
}
