use std::sync::Arc;
use aws_sdk_dynamodb::types::ScalarAttributeType;
use crate::borrowers::repository::BorrowerRepository;
use crate::borrowers::repository::ddb_borrower_repository::DDBBorrowerRepository;
use crate::borrowers::repository::memory_borrower_repository::MemoryBorrowerRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_sequences_table, create_table};

pub(crate) async fn create_borrower_repository(store: RepositoryStore) -> Arc<dyn BorrowerRepository> {
    match store {
        RepositoryStore::InMemory => {
            Arc::new(MemoryBorrowerRepository::new())
        }
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBBorrowerRepository::new(client, "borrowers", "borrowers_ndx", "borrower_emails"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "borrowers", "borrower_id", ScalarAttributeType::N, Some(("email", "name"))).await;
            let _ = create_table(&client, "borrower_emails", "email", ScalarAttributeType::S, None).await;
            let _ = create_sequences_table(&client).await;
            Arc::new(DDBBorrowerRepository::new(client, "borrowers", "borrowers_ndx", "borrower_emails"))
        }
    }
}
