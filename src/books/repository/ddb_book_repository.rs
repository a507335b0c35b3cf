use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::domain::Persistent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{next_sequence, number, parse_date_attribute, parse_item, parse_number_attribute, parse_optional_number_attribute, parse_string_attribute, string_date};

#[derive(Debug)]
pub(crate) struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    // scans the whole table following last_evaluated_key, optionally filtered on borrower_id
    async fn scan(&self, borrower_id: Option<i64>) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key);
            if let Some(borrower_id) = borrower_id {
                request = request
                    .filter_expression("borrower_id = :borrower_id")
                    .expression_attribute_values(":borrower_id", number(borrower_id));
            }
            let out = request.send().await?;
            if let Some(items) = out.items() {
                records.extend(items.iter().map(map_to_book));
            }
            exclusive_start_key = out.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
        }
        records.sort_by_key(|b| b.book_id);
        Ok(records)
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let book_id = next_sequence(&self.client, table_name).await?;
        let book = entity.with_identity(book_id, 0);
        let val = serde_json::to_value(&book)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| book).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        let mut request = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number(entity.book_id))
            .expression_attribute_values(":old_version", number(entity.version))
            .expression_attribute_values(":version", number(entity.version + 1))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version");
        request = match entity.borrower_id {
            Some(borrower_id) => {
                request
                    .update_expression("SET version = :version, borrower_id = :borrower_id, updated_at = :updated_at")
                    .expression_attribute_values(":borrower_id", number(borrower_id))
            }
            None => {
                request.update_expression("SET version = :version, updated_at = :updated_at REMOVE borrower_id")
            }
        };
        request.send().await?;

        let mut book = entity.with_identity(entity.book_id, entity.version + 1);
        book.updated_at = now;
        Ok(book)
    }

    async fn find_by_id(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", number(id))
            .consistent_read(true)
            .send()
            .await?;
        Ok(out.item().map(map_to_book))
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.scan(None).await
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let out = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .key_condition_expression("isbn = :isbn")
                .expression_attribute_values(":isbn", AttributeValue::S(isbn.to_string()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;
            if let Some(items) = out.items() {
                records.extend(items.iter().map(map_to_book));
            }
            exclusive_start_key = out.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
        }
        records.sort_by_key(|b| b.book_id);
        Ok(records)
    }

    async fn find_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<BookEntity>> {
        self.scan(Some(borrower_id)).await
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        version: parse_number_attribute("version", map),
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        borrower_id: parse_optional_number_attribute("borrower_id", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use aws_sdk_dynamodb::types::ScalarAttributeType;
    use lazy_static::lazy_static;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::DDBBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_sequences_table, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "test_books").await;
                let _ = create_table(&client, "test_books", "book_id", ScalarAttributeType::N, Some(("isbn", "title"))).await;
                let _ = create_sequences_table(&client).await;
                client
            });
    }

    async fn books_repo() -> DDBBookRepository {
        DDBBookRepository::new(CLIENT.get().await.clone(), "test_books", "test_books_ndx")
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_create_get_books() {
        let books_repo = books_repo().await;
        let book = books_repo.create(&BookEntity::new("isbn", "test book", "author")).await.expect("should create book");
        assert!(book.book_id > 0);

        let loaded = books_repo.find_by_id(book.book_id).await.expect("should query book").expect("should find book");
        assert_eq!(book.book_id, loaded.book_id);
        assert_eq!(None, loaded.borrower_id);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_borrow_and_return_books() {
        let books_repo = books_repo().await;
        let mut book = books_repo.create(&BookEntity::new("isbn", "test book", "author")).await.expect("should create book");

        book.borrower_id = Some(11);
        let borrowed = books_repo.update(&book).await.expect("should update book");
        assert_eq!(1, borrowed.version);
        let loaded = books_repo.find_by_id(book.book_id).await.expect("should query").expect("should find");
        assert_eq!(Some(11), loaded.borrower_id);
        assert_eq!(1, books_repo.find_by_borrower(11).await.expect("should query").iter()
            .filter(|b| b.book_id == book.book_id).count());

        let mut returned = loaded.clone();
        returned.borrower_id = None;
        let _ = books_repo.update(&returned).await.expect("should update book");
        let loaded = books_repo.find_by_id(book.book_id).await.expect("should query").expect("should find");
        assert_eq!(None, loaded.borrower_id);
        assert_eq!(2, loaded.version);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_reject_stale_update() {
        let books_repo = books_repo().await;
        let book = books_repo.create(&BookEntity::new("isbn", "test book", "author")).await.expect("should create book");
        let mut first = book.clone();
        first.borrower_id = Some(1);
        let _ = books_repo.update(&first).await.expect("should update book");
        let mut second = book.clone();
        second.borrower_id = Some(2);
        let res = books_repo.update(&second).await;
        assert!(matches!(res, Err(LibraryError::CurrentlyUnavailable { retryable: true, .. })));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_query_books_by_isbn() {
        let books_repo = books_repo().await;
        for i in 0..30 {
            let book = BookEntity::new(format!("ddb_isbn_{}", i / 10).as_str(),
                                       format!("title_{}", i / 10).as_str(), "author");
            let _ = books_repo.create(&book).await.expect("should create book");
        }
        let res = books_repo.find_by_isbn("ddb_isbn_0").await.expect("should return books");
        assert_eq!(10, res.len());
        assert!(res.windows(2).all(|w| w[0].book_id < w[1].book_id));
        let all = books_repo.find_all().await.expect("should return books");
        assert!(all.len() >= 30);
    }
}
