use std::env;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
    fn version(&self) -> i64;
}

// Persistent is implemented by stored records whose id and version are assigned by the store.
pub trait Persistent: Identifiable + Clone {
    fn with_identity(&self, id: i64, version: i64) -> Self;
}

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub store: RepositoryStore,
    pub log_level: String,
    pub dev_mode: bool,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            store: RepositoryStore::InMemory,
            log_level: "info".to_string(),
            dev_mode: true,
        }
    }

    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new(lookup("LMS_BRANCH").unwrap_or("dev".to_string()).as_str());
        if let Some(store) = lookup("LMS_STORE") {
            config.store = RepositoryStore::try_from(store.as_str())?;
        }
        if let Some(level) = lookup("LMS_LOG_LEVEL") {
            tracing::Level::from_str(level.as_str()).map_err(|err| {
                LibraryError::validation(format!("invalid LMS_LOG_LEVEL {:?}: {}", level, err).as_str(), None)
            })?;
            config.log_level = level;
        }
        config.dev_mode = lookup("AWS_LAMBDA_RUNTIME_API").is_none();
        Ok(config)
    }
}

// rejects a required field that is empty or whitespace
pub(crate) fn require_field(name: &str, value: &str) -> LibraryResult<()> {
    if value.trim().is_empty() {
        return Err(LibraryError::validation(format!("{} is required", name).as_str(), Some(name.to_string())));
    }
    Ok(())
}
