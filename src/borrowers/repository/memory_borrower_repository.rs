use async_trait::async_trait;
use chrono::Utc;
use crate::borrowers::domain::model::BorrowerEntity;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::memory::MemoryTable;
use crate::core::repository::Repository;

#[derive(Debug)]
pub(crate) struct MemoryBorrowerRepository {
    table: MemoryTable<BorrowerEntity>,
}

impl MemoryBorrowerRepository {
    pub(crate) fn new() -> Self {
        Self {
            table: MemoryTable::new("borrowers"),
        }
    }
}

#[async_trait]
impl Repository<BorrowerEntity> for MemoryBorrowerRepository {
    async fn create(&self, entity: &BorrowerEntity) -> LibraryResult<BorrowerEntity> {
        self.table.insert_unless(entity, |other| {
            if other.email == entity.email {
                Some(format!("email {} is already registered", entity.email))
            } else {
                None
            }
        }).await
    }

    async fn update(&self, entity: &BorrowerEntity) -> LibraryResult<BorrowerEntity> {
        let stored = self.table.get(entity.borrower_id).await.ok_or_else(|| {
            LibraryError::not_found(format!("borrower not found for {}", entity.borrower_id).as_str())
        })?;
        entity.ensure_unchanged_from(&stored)?;
        let mut borrower = entity.clone();
        borrower.updated_at = Utc::now().naive_utc();
        self.table.replace(&borrower).await
    }

    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BorrowerEntity>> {
        Ok(self.table.get(id).await)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BorrowerEntity>> {
        Ok(self.table.all().await)
    }
}

#[async_trait]
impl BorrowerRepository for MemoryBorrowerRepository {
    async fn exists_by_email(&self, email: &str) -> LibraryResult<bool> {
        Ok(self.table.any(|b| b.email == email).await)
    }
}
