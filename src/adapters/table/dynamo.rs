use super::collect_pages;
use crate::core::{FieldValue, Record, TableStore};
use crate::utils::error::{EtlError, Result};
use aws_sdk_dynamodb::error::ProvideErrorMetadata;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamoTable {
    client: DynamoClient,
    table_name: String,
}

impl DynamoTable {
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn table_error(&self, operation: &str, message: String) -> EtlError {
        EtlError::TableError {
            table: self.table_name.clone(),
            operation: operation.to_string(),
            message,
        }
    }

    async fn scan_page(&self, start_key: Option<Item>) -> Result<(Vec<Item>, Option<Item>)> {
        let resp = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                self.table_error(
                    "scan",
                    format!(
                        "{} ({})",
                        service_error,
                        service_error.code().unwrap_or("unknown")
                    ),
                )
            })?;

        let next = resp
            .last_evaluated_key()
            .filter(|key| !key.is_empty())
            .cloned();
        Ok((resp.items().to_vec(), next))
    }
}

impl TableStore for DynamoTable {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn scan(&self) -> Result<Vec<Record>> {
        let items = collect_pages(|start_key| self.scan_page(start_key)).await?;
        tracing::debug!("Scanned {} items from {}", items.len(), self.table_name);
        items.into_iter().map(record_from_item).collect()
    }

    async fn put_item(&self, record: &Record) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_from_record(record)))
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                self.table_error(
                    "put_item",
                    format!(
                        "{} ({})",
                        service_error,
                        service_error.code().unwrap_or("unknown")
                    ),
                )
            })?;
        Ok(())
    }

    async fn delete_item(&self, key_field: &str, key: &FieldValue) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(key_field, to_attribute_value(key))
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                self.table_error(
                    "delete_item",
                    format!(
                        "{} ({})",
                        service_error,
                        service_error.code().unwrap_or("unknown")
                    ),
                )
            })?;
        Ok(())
    }
}

pub fn record_from_item(item: Item) -> Result<Record> {
    item.into_iter()
        .map(|(name, value)| -> Result<(String, FieldValue)> {
            Ok((name, from_attribute_value(value)?))
        })
        .collect()
}

pub fn item_from_record(record: &Record) -> Item {
    record
        .data
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect()
}

pub fn to_attribute_value(value: &FieldValue) -> AttributeValue {
    match value {
        FieldValue::S(s) => AttributeValue::S(s.clone()),
        FieldValue::N(n) => AttributeValue::N(n.clone()),
        FieldValue::B(b) => AttributeValue::B(Blob::new(b.clone())),
        FieldValue::Bool(b) => AttributeValue::Bool(*b),
        FieldValue::Null(n) => AttributeValue::Null(*n),
        FieldValue::L(list) => AttributeValue::L(list.iter().map(to_attribute_value).collect()),
        FieldValue::M(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), to_attribute_value(v)))
                .collect(),
        ),
        FieldValue::Ss(set) => AttributeValue::Ss(set.clone()),
        FieldValue::Ns(set) => AttributeValue::Ns(set.clone()),
        FieldValue::Bs(set) => AttributeValue::Bs(set.iter().cloned().map(Blob::new).collect()),
    }
}

pub fn from_attribute_value(value: AttributeValue) -> Result<FieldValue> {
    Ok(match value {
        AttributeValue::S(s) => FieldValue::S(s),
        AttributeValue::N(n) => FieldValue::N(n),
        AttributeValue::B(b) => FieldValue::B(b.into_inner()),
        AttributeValue::Bool(b) => FieldValue::Bool(b),
        AttributeValue::Null(n) => FieldValue::Null(n),
        AttributeValue::L(list) => FieldValue::L(
            list.into_iter()
                .map(from_attribute_value)
                .collect::<Result<_>>()?,
        ),
        AttributeValue::M(map) => FieldValue::M(
            map.into_iter()
                .map(|(k, v)| -> Result<(String, FieldValue)> {
                    Ok((k, from_attribute_value(v)?))
                })
                .collect::<Result<_>>()?,
        ),
        AttributeValue::Ss(set) => FieldValue::Ss(set),
        AttributeValue::Ns(set) => FieldValue::Ns(set),
        AttributeValue::Bs(set) => FieldValue::Bs(set.into_iter().map(Blob::into_inner).collect()),
        other => {
            return Err(EtlError::ProcessingError {
                message: format!("Unsupported attribute value: {:?}", other),
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_values_convert_both_ways() {
        let value = FieldValue::M(HashMap::from([
            ("votes".to_string(), FieldValue::N("3".to_string())),
            (
                "tags".to_string(),
                FieldValue::L(vec![FieldValue::from("fluffy"), FieldValue::Bool(true)]),
            ),
            ("photo".to_string(), FieldValue::B(vec![0xff, 0xd8])),
            ("nothing".to_string(), FieldValue::Null(true)),
        ]));

        let attribute = to_attribute_value(&value);
        assert!(matches!(attribute, AttributeValue::M(ref m) if m.len() == 4));
        assert_eq!(from_attribute_value(attribute).unwrap(), value);
    }

    #[test]
    fn test_record_from_item() {
        let item: Item = HashMap::from([
            ("id".to_string(), AttributeValue::S("abc".to_string())),
            ("ratings".to_string(), AttributeValue::Ns(vec!["1".to_string(), "5".to_string()])),
        ]);

        let record = record_from_item(item).unwrap();
        assert_eq!(record.get("id"), Some(&FieldValue::from("abc")));
        assert_eq!(
            record.get("ratings"),
            Some(&FieldValue::Ns(vec!["1".to_string(), "5".to_string()]))
        );
        assert_eq!(item_from_record(&record).len(), 2);
    }
}
