use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

#[async_trait]
pub trait Repository<Entity: Identifiable>: Sync + Send {
    // create an entity, the store assigns its id and returns the stored record
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // updates an entity if its version still matches the stored one
    async fn update(&self, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity
    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<Entity>>;

    // all entities in id order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;

    // insert-or-update
    async fn save(&self, entity: &Entity) -> LibraryResult<Entity> {
        if entity.id() == 0 {
            self.create(entity).await
        } else {
            self.update(entity).await
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    InMemory,
    DynamoDB,
    LocalDynamoDB,
}

impl TryFrom<&str> for RepositoryStore {
    type Error = LibraryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(RepositoryStore::InMemory),
            "dynamodb" => Ok(RepositoryStore::DynamoDB),
            "local-dynamodb" => Ok(RepositoryStore::LocalDynamoDB),
            other => Err(LibraryError::validation(
                format!("unknown repository store {}", other).as_str(), None)),
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::InMemory => write!(f, "memory"),
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local-dynamodb"),
        }
    }
}
