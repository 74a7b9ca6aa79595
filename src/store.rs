//! Domain stores over the DynamoDB wrapper.
//!
//! Handlers depend on the [`BookStore`] and [`ReadingListStore`] traits, so
//! tests can run against an in-memory double instead of a live table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_attribute_value, to_item};
use serde_json::Value;

use crate::config::Config;
use crate::dynamodb::{Attributes, DynamoDb};
use crate::model::{ListUpdate, ReadingList};

/// Read-only access to the books table. Books are opaque documents; the API
/// passes them through untouched.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn get_book(&self, id: &str) -> Result<Option<Value>>;
    async fn list_books(&self) -> Result<Vec<Value>>;
}

#[async_trait]
pub trait ReadingListStore: Send + Sync {
    async fn put_list(&self, list: &ReadingList) -> Result<()>;
    /// All lists whose `userId` attribute equals the given value. Implemented
    /// as a scan with a post-filter; the key schema does not make `userId`
    /// queryable on its own.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ReadingList>>;
    /// Overwrites the update fields on (`id`, `user_id`) and returns the
    /// record as stored afterwards. No existence check: a missing key yields
    /// a sparse upserted record.
    async fn update_list(&self, id: &str, user_id: &str, update: &ListUpdate)
        -> Result<ReadingList>;
    /// Delete by key; deleting a missing key is not an error.
    async fn delete_list(&self, id: &str, user_id: &str) -> Result<()>;
}

/// DynamoDB-backed implementation of both store traits.
#[derive(Debug)]
pub struct LibraryStore {
    db: DynamoDb,
    books_table: String,
    reading_lists_table: String,
}

impl LibraryStore {
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &Config) -> Self {
        Self {
            db: DynamoDb::new(sdk_config),
            books_table: config.books_table.clone(),
            reading_lists_table: config.reading_lists_table.clone(),
        }
    }
}

fn book_key(id: &str) -> Attributes {
    Attributes::from([("id".to_string(), AttributeValue::S(id.to_string()))])
}

fn list_key(id: &str, user_id: &str) -> Attributes {
    Attributes::from([
        ("id".to_string(), AttributeValue::S(id.to_string())),
        ("userId".to_string(), AttributeValue::S(user_id.to_string())),
    ])
}

#[async_trait]
impl BookStore for LibraryStore {
    async fn get_book(&self, id: &str) -> Result<Option<Value>> {
        let item = self.db.get_item(&self.books_table, book_key(id)).await?;
        item.map(|attrs| from_item(attrs).context("malformed book item"))
            .transpose()
    }

    async fn list_books(&self) -> Result<Vec<Value>> {
        let items = self.db.scan(&self.books_table, None).await?;
        from_items(items).context("malformed book item")
    }
}

#[async_trait]
impl ReadingListStore for LibraryStore {
    async fn put_list(&self, list: &ReadingList) -> Result<()> {
        let item = to_item(list).context("failed to serialize reading list")?;
        self.db.put_item(&self.reading_lists_table, item).await
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ReadingList>> {
        let filter = ("userId", AttributeValue::S(user_id.to_string()));
        let items = self
            .db
            .scan(&self.reading_lists_table, Some(filter))
            .await?;
        from_items(items).context("malformed reading list item")
    }

    async fn update_list(
        &self,
        id: &str,
        user_id: &str,
        update: &ListUpdate,
    ) -> Result<ReadingList> {
        let updates = Attributes::from([
            (
                "name".to_string(),
                AttributeValue::S(update.name.clone()),
            ),
            (
                "description".to_string(),
                AttributeValue::S(update.description.clone()),
            ),
            (
                "bookIds".to_string(),
                to_attribute_value(&update.book_ids)
                    .context("failed to serialize book ids")?,
            ),
            (
                "updatedAt".to_string(),
                AttributeValue::S(update.updated_at.clone()),
            ),
        ]);

        let attrs = self
            .db
            .update_item(&self.reading_lists_table, list_key(id, user_id), updates)
            .await?;
        from_item(attrs).context("malformed reading list item")
    }

    async fn delete_list(&self, id: &str, user_id: &str) -> Result<()> {
        self.db
            .delete_item(&self.reading_lists_table, list_key(id, user_id))
            .await
    }
}
