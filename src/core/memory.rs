use std::collections::BTreeMap;
use tokio::sync::RwLock;
use crate::core::domain::Persistent;
use crate::core::library::{LibraryError, LibraryResult};

// MemoryTable is a process-local table of records keyed by a store-assigned id. All writes
// happen under the write lock, so id assignment, uniqueness checks and version checks are
// atomic with the write they guard.
#[derive(Debug)]
pub(crate) struct MemoryTable<E> {
    name: String,
    state: RwLock<TableState<E>>,
}

#[derive(Debug)]
struct TableState<E> {
    last_id: i64,
    records: BTreeMap<i64, E>,
}

impl<E: Persistent> MemoryTable<E> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: RwLock::new(TableState { last_id: 0, records: BTreeMap::new() }),
        }
    }

    pub(crate) async fn insert(&self, entity: &E) -> LibraryResult<E> {
        self.insert_unless(entity, |_| None).await
    }

    // inserts unless `conflict` reports a clash with an existing record
    pub(crate) async fn insert_unless<F>(&self, entity: &E, conflict: F) -> LibraryResult<E>
        where F: Fn(&E) -> Option<String> {
        let mut state = self.state.write().await;
        if let Some(reason) = state.records.values().find_map(&conflict) {
            return Err(LibraryError::duplicate_key(
                format!("{} insert rejected: {}", self.name, reason).as_str()));
        }
        state.last_id += 1;
        let record = entity.with_identity(state.last_id, 0);
        state.records.insert(record.id(), record.clone());
        Ok(record)
    }

    pub(crate) async fn replace(&self, entity: &E) -> LibraryResult<E> {
        let mut state = self.state.write().await;
        let stored = state.records.get(&entity.id()).ok_or_else(|| {
            LibraryError::not_found(format!("{} record not found for {}", self.name, entity.id()).as_str())
        })?;
        if stored.version() != entity.version() {
            return Err(LibraryError::unavailable(
                format!("{} record {} changed concurrently, expected version {} but found {}",
                        self.name, entity.id(), entity.version(), stored.version()).as_str(),
                Some("409".to_string()), true));
        }
        let record = entity.with_identity(entity.id(), entity.version() + 1);
        state.records.insert(record.id(), record.clone());
        Ok(record)
    }

    pub(crate) async fn get(&self, id: i64) -> Option<E> {
        self.state.read().await.records.get(&id).cloned()
    }

    pub(crate) async fn all(&self) -> Vec<E> {
        self.state.read().await.records.values().cloned().collect()
    }

    pub(crate) async fn filter<P>(&self, predicate: P) -> Vec<E>
        where P: Fn(&E) -> bool {
        self.state.read().await.records.values().filter(|r| predicate(r)).cloned().collect()
    }

    pub(crate) async fn any<P>(&self, predicate: P) -> bool
        where P: Fn(&E) -> bool {
        self.state.read().await.records.values().any(predicate)
    }
}
