use std::collections::HashMap;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection, ProjectionType, ProvisionedThroughput, ReturnValue, ScalarAttributeType, TableStatus};
use chrono::NaiveDateTime;
use serde_json::Value;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::DATE_FMT;

pub(crate) const LOCAL_DYNAMODB_URL: &str = "http://localhost:8000";
pub(crate) const SEQUENCES_TABLE: &str = "sequences";

// creates a table keyed by `pk`, with an optional `<table>_ndx` global index over (gsi_pk, gsi_sk)
pub(crate) async fn create_table(client: &Client,
                                 table_name: &str, pk: &str, pk_type: ScalarAttributeType,
                                 gsi_keys: Option<(&str, &str)>) -> LibraryResult<()> {
    let mut request = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(pk)
                .attribute_type(pk_type)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        );

    if let Some((gsi_pk, gsi_sk)) = gsi_keys {
        let gsi = GlobalSecondaryIndex::builder()
            .index_name(format!("{}_ndx", table_name))
            .key_schema(KeySchemaElement::builder()
                .attribute_name(gsi_pk)
                .key_type(KeyType::Hash).build())
            .key_schema(KeySchemaElement::builder()
                .attribute_name(gsi_sk)
                .key_type(KeyType::Range).build())
            .projection(Projection::builder().projection_type(ProjectionType::All).build())
            .provisioned_throughput(
                ProvisionedThroughput::builder().read_capacity_units(10).write_capacity_units(10).build())
            .build();
        request = request
            .global_secondary_indexes(gsi)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(gsi_pk)
                    .attribute_type(ScalarAttributeType::S)
                    .build(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(gsi_sk)
                    .attribute_type(ScalarAttributeType::S)
                    .build(),
            );
    }

    match request.send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to create {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

#[cfg(test)]
pub(crate) async fn delete_table(client: &Client, table_name: &str) -> LibraryResult<()> {
    match client.delete_table().table_name(table_name).send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to delete {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> LibraryResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(status.clone());
                }
            }
            Err(LibraryError::runtime(format!("failed to describe {} table",
                                              table_name).as_str(), None))
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to describe {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

// atomically increments the named counter in the sequences table and returns the new value
pub(crate) async fn next_sequence(client: &Client, sequence: &str) -> LibraryResult<i64> {
    let out = client
        .update_item()
        .table_name(SEQUENCES_TABLE)
        .key("sequence_name", AttributeValue::S(sequence.to_string()))
        .update_expression("ADD next_id :one")
        .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
        .return_values(ReturnValue::UpdatedNew)
        .send()
        .await?;
    let next_id = out.attributes().map(|attrs| parse_number_attribute("next_id", attrs)).unwrap_or(0);
    if next_id > 0 {
        Ok(next_id)
    } else {
        Err(LibraryError::database(format!("sequence {} returned no id", sequence).as_str(), None, false))
    }
}

pub(crate) fn parse_item(value: Value) -> Result<HashMap<String, AttributeValue>, String> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(format!("failed to parse{:?}", other)),
    }
}

pub(crate) fn parse_string_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<String> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        return Some(str.clone());
    }
    None
}

pub(crate) fn parse_date_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<NaiveDateTime> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        // e.g. 2022-09-24T04:40:35.726029
        if let Ok(date) = NaiveDateTime::parse_from_str(str, DATE_FMT) {
            return Some(date);
        }
    }
    None
}

pub(crate) fn string_date(date: NaiveDateTime) -> AttributeValue {
    AttributeValue::S(format!("{}", date.format(DATE_FMT)))
}

pub(crate) fn parse_number_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> i64 {
    parse_optional_number_attribute(name, map).unwrap_or(0)
}

// missing and NULL attributes both read as None
pub(crate) fn parse_optional_number_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<i64> {
    if let Some(AttributeValue::N(str)) = map.get(name) {
        if let Ok(n) = str.parse::<i64>() {
            return Some(n);
        }
    }
    None
}

pub(crate) fn number(n: i64) -> AttributeValue {
    AttributeValue::N(n.to_string())
}

fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

// helper method to build db-client
pub(crate) async fn build_db_client(store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::LocalDynamoDB => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(LOCAL_DYNAMODB_URL)
                .build();
            Client::from_conf(dynamodb_local_config)
        }
        _ => {
            //Get config from environment.
            let config = aws_config::load_from_env().await;
            //Create the DynamoDB client.
            Client::new(&config)
        }
    }
}

// creates the id sequences table used by every DynamoDB repository
pub(crate) async fn create_sequences_table(client: &Client) -> LibraryResult<()> {
    create_table(client, SEQUENCES_TABLE, "sequence_name", ScalarAttributeType::S, None).await
}

impl From<SdkError<UpdateItemError>> for LibraryError {
    fn from(err: SdkError<UpdateItemError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if ctx.err().is_conditional_check_failed_exception() {
                return LibraryError::unavailable(
                    format!("stale version, record was updated concurrently {:?}", ctx.err()).as_str(),
                    Some("409".to_string()), true);
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<PutItemError>> for LibraryError {
    fn from(err: SdkError<PutItemError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if ctx.err().is_conditional_check_failed_exception() {
                return LibraryError::duplicate_key(
                    format!("item already exists {:?}", ctx.err()).as_str());
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<TransactWriteItemsError>> for LibraryError {
    fn from(err: SdkError<TransactWriteItemsError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if let TransactWriteItemsError::TransactionCanceledException(canceled) = ctx.err() {
                let codes: Vec<&str> = canceled.cancellation_reasons().unwrap_or_default()
                    .iter().filter_map(|reason| reason.code()).collect();
                return transaction_canceled_error(&codes, format!("{:?}", canceled).as_str());
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

// only a failed condition means a guarded key exists; conflicts and throttling are transient
fn transaction_canceled_error(codes: &[&str], detail: &str) -> LibraryError {
    if codes.iter().any(|code| *code == "ConditionalCheckFailed") {
        return LibraryError::duplicate_key(format!("transaction canceled by a condition {}", detail).as_str());
    }
    let reason = codes.iter().filter(|code| **code != "None").cloned().collect::<Vec<&str>>().join(",");
    LibraryError::database_or_unavailable(format!("transaction canceled {}", detail).as_str(), Some(reason), true)
}

impl From<SdkError<GetItemError>> for LibraryError {
    fn from(err: SdkError<GetItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<QueryError>> for LibraryError {
    fn from(err: SdkError<QueryError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<ScanError>> for LibraryError {
    fn from(err: SdkError<ScanError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    if let Some(b) = opts {
        //"ProvisionedThroughputExceeded", "LimitExceeded"
        return b.windows(6).any(|w| w == b"ceeded");
    }
    false
}
