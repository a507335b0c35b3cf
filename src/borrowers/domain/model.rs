use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::{Identifiable, Persistent};
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::serializer;

// BorrowerEntity is a registered library member, identified by a store-assigned id and unique email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BorrowerEntity {
    pub borrower_id: i64,
    pub version: i64,
    pub email: String,
    pub name: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BorrowerEntity {
    pub fn new(email: &str, name: &str) -> Self {
        Self {
            borrower_id: 0,
            version: 0,
            email: email.to_string(),
            name: name.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // a registered borrower keeps its email and name; stores only bump the version
    pub(crate) fn ensure_unchanged_from(&self, stored: &BorrowerEntity) -> LibraryResult<()> {
        if self.email != stored.email || self.name != stored.name {
            return Err(LibraryError::validation(
                format!("borrower {} cannot change email or name once registered", self.borrower_id).as_str(), None));
        }
        Ok(())
    }
}

impl Identifiable for BorrowerEntity {
    fn id(&self) -> i64 {
        self.borrower_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Persistent for BorrowerEntity {
    fn with_identity(&self, id: i64, version: i64) -> Self {
        let mut borrower = self.clone();
        borrower.borrower_id = id;
        borrower.version = version;
        borrower
    }
}
