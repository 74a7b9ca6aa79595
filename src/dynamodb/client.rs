use anyhow::Result;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use std::collections::HashMap;
use tracing::info;

/// A raw DynamoDB item or key: attribute name to attribute value.
pub type Attributes = HashMap<String, AttributeValue>;

/// DynamoDB client wrapper for the item operations used by this API.
///
/// One instance is built per process and shared across invocations; the
/// underlying SDK client is stateless per call, so no teardown is needed.
#[derive(Debug)]
pub struct DynamoDb {
    client: Client,
}

impl DynamoDb {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Gets an item by primary key. Returns `None` on a miss.
    pub async fn get_item(&self, table_name: &str, key: Attributes) -> Result<Option<Attributes>> {
        let response = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await?;

        Ok(response.item)
    }

    /// Puts an item, replacing any existing item with the same key.
    pub async fn put_item(&self, table_name: &str, item: Attributes) -> Result<()> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await?;

        info!("Item added to '{table_name}'");
        Ok(())
    }

    /// Overwrites the given attributes on the item addressed by `key` and
    /// returns all attributes of the item as it stands after the update.
    ///
    /// DynamoDB upserts here: a key that was never put still gets a record
    /// holding only the key and the updated attributes.
    pub async fn update_item(
        &self,
        table_name: &str,
        key: Attributes,
        updates: Attributes,
    ) -> Result<Attributes> {
        let (update_expression, names, values) = build_update_expression(&updates);

        let response = self
            .client
            .update_item()
            .table_name(table_name)
            .set_key(Some(key))
            .update_expression(update_expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(aws_sdk_dynamodb::types::ReturnValue::AllNew)
            .send()
            .await?;

        info!("Item updated in '{table_name}'");
        Ok(response.attributes.unwrap_or_default())
    }

    /// Deletes an item by primary key. Deleting a missing key succeeds.
    pub async fn delete_item(&self, table_name: &str, key: Attributes) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await?;

        info!("Item deleted from '{table_name}'");
        Ok(())
    }

    /// Scans a table, following pagination until exhaustion. When `filter`
    /// is given, only items whose attribute equals the value are returned;
    /// DynamoDB still reads the whole table, so this stays a toy-scale tool.
    pub async fn scan(
        &self,
        table_name: &str,
        filter: Option<(&str, AttributeValue)>,
    ) -> Result<Vec<Attributes>> {
        let mut items = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let mut scan = self.client.scan().table_name(table_name);

            if let Some((attribute, value)) = &filter {
                scan = scan
                    .filter_expression("#attr = :value")
                    .expression_attribute_names("#attr", *attribute)
                    .expression_attribute_values(":value", value.clone());
            }

            if let Some(key) = last_evaluated_key {
                scan = scan.set_exclusive_start_key(Some(key));
            }

            let response = scan.send().await?;

            if let Some(new_items) = response.items {
                items.extend(new_items);
            }

            last_evaluated_key = response.last_evaluated_key;

            if last_evaluated_key.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

/// Builds a `SET` update expression with one placeholder pair per attribute.
///
/// Attribute names go through `#` placeholders because several of ours
/// (`name` among them) are DynamoDB reserved words. Keys are sorted so the
/// expression is deterministic.
fn build_update_expression(
    updates: &Attributes,
) -> (String, HashMap<String, String>, Attributes) {
    let mut names = HashMap::new();
    let mut values = HashMap::new();
    let mut clauses = Vec::with_capacity(updates.len());

    let mut sorted: Vec<_> = updates.iter().collect();
    sorted.sort_by_key(|(name, _)| name.as_str());

    for (i, (attr_name, attr_value)) in sorted.into_iter().enumerate() {
        let name_placeholder = format!("#attr{i}");
        let value_placeholder = format!(":val{i}");
        clauses.push(format!("{name_placeholder} = {value_placeholder}"));
        names.insert(name_placeholder, attr_name.clone());
        values.insert(value_placeholder, attr_value.clone());
    }

    (format!("SET {}", clauses.join(", ")), names, values)
}
