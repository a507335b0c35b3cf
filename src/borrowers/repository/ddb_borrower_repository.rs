use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem};
use chrono::Utc;

use crate::borrowers::domain::model::BorrowerEntity;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::domain::Persistent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{next_sequence, number, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date};

#[derive(Debug)]
pub(crate) struct DDBBorrowerRepository {
    client: Client,
    table_name: String,
    index_name: String,
    // holds one item per registered email so the uniqueness check rides in the insert transaction
    emails_table_name: String,
}

impl DDBBorrowerRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, emails_table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
            emails_table_name: emails_table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BorrowerEntity> for DDBBorrowerRepository {
    async fn create(&self, entity: &BorrowerEntity) -> LibraryResult<BorrowerEntity> {
        let table_name: &str = self.table_name.as_ref();
        let borrower_id = next_sequence(&self.client, table_name).await?;
        let borrower = entity.with_identity(borrower_id, 0);
        let val = serde_json::to_value(&borrower)?;

        let put_borrower = Put::builder()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(borrower_id)")
            .set_item(Some(parse_item(val)?))
            .build();
        let put_email = Put::builder()
            .table_name(self.emails_table_name.as_str())
            .condition_expression("attribute_not_exists(email)")
            .item("email", AttributeValue::S(borrower.email.to_string()))
            .item("borrower_id", number(borrower_id))
            .build();
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put_borrower).build())
            .transact_items(TransactWriteItem::builder().put(put_email).build())
            .send()
            .await.map(|_| borrower).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &BorrowerEntity) -> LibraryResult<BorrowerEntity> {
        let stored = self.find_by_id(entity.borrower_id).await?.ok_or_else(|| {
            LibraryError::not_found(format!("borrower not found for {}", entity.borrower_id).as_str())
        })?;
        entity.ensure_unchanged_from(&stored)?;
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("borrower_id", number(entity.borrower_id))
            .update_expression("SET version = :version, updated_at = :updated_at")
            .expression_attribute_values(":old_version", number(entity.version))
            .expression_attribute_values(":version", number(entity.version + 1))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await?;
        let mut borrower = entity.with_identity(entity.borrower_id, entity.version + 1);
        borrower.updated_at = now;
        Ok(borrower)
    }

    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BorrowerEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key("borrower_id", number(id))
            .consistent_read(true)
            .send()
            .await?;
        Ok(out.item().map(map_to_borrower))
    }

    async fn find_all(&self) -> LibraryResult<Vec<BorrowerEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let out = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;
            if let Some(items) = out.items() {
                records.extend(items.iter().map(map_to_borrower));
            }
            exclusive_start_key = out.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
        }
        records.sort_by_key(|b| b.borrower_id);
        Ok(records)
    }
}

#[async_trait]
impl BorrowerRepository for DDBBorrowerRepository {
    async fn exists_by_email(&self, email: &str) -> LibraryResult<bool> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let out = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(1)
            .key_condition_expression("email = :email")
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
            .send()
            .await?;
        Ok(out.count() > 0)
    }
}

fn map_to_borrower(map: &HashMap<String, AttributeValue>) -> BorrowerEntity {
    BorrowerEntity {
        borrower_id: parse_number_attribute("borrower_id", map),
        version: parse_number_attribute("version", map),
        email: parse_string_attribute("email", map).unwrap_or(String::from("")),
        name: parse_string_attribute("name", map).unwrap_or(String::from("")),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
