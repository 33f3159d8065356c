use super::collect_pages;
use crate::core::{FieldValue, Record, TableStore};
use crate::utils::error::{EtlError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process table keyed by a single attribute. Scans are served in pages
/// of `page_size` rows, like a real paginating store.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    name: String,
    key_field: String,
    page_size: usize,
    rows: Arc<Mutex<Vec<Record>>>,
}

impl MemoryTable {
    pub fn new(name: &str, key_field: &str) -> Self {
        Self {
            name: name.to_string(),
            key_field: key_field.to_string(),
            page_size: 100,
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn with_records(self, records: Vec<Record>) -> Self {
        self.rows.lock().await.extend(records);
        self
    }

    pub async fn records(&self) -> Vec<Record> {
        self.rows.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }

    async fn scan_page(&self, offset: usize) -> (Vec<Record>, Option<usize>) {
        let rows = self.rows.lock().await;
        let end = (offset + self.page_size).min(rows.len());
        let page = rows[offset.min(end)..end].to_vec();
        let next = (end < rows.len()).then_some(end);
        (page, next)
    }
}

impl TableStore for MemoryTable {
    fn table_name(&self) -> &str {
        &self.name
    }

    async fn scan(&self) -> Result<Vec<Record>> {
        collect_pages(|cursor: Option<usize>| async move {
            Ok::<_, EtlError>(self.scan_page(cursor.unwrap_or(0)).await)
        })
        .await
    }

    async fn put_item(&self, record: &Record) -> Result<()> {
        let key = record
            .get(&self.key_field)
            .ok_or_else(|| EtlError::TableError {
                table: self.name.clone(),
                operation: "put_item".to_string(),
                message: format!("missing key attribute '{}'", self.key_field),
            })?
            .clone();

        let mut rows = self.rows.lock().await;
        match rows
            .iter_mut()
            .find(|row| row.get(&self.key_field) == Some(&key))
        {
            Some(existing) => *existing = record.clone(),
            None => rows.push(record.clone()),
        }
        Ok(())
    }

    async fn delete_item(&self, key_field: &str, key: &FieldValue) -> Result<()> {
        if key_field != self.key_field {
            return Err(EtlError::TableError {
                table: self.name.clone(),
                operation: "delete_item".to_string(),
                message: format!("'{}' is not the key attribute", key_field),
            });
        }

        self.rows
            .lock()
            .await
            .retain(|row| row.get(key_field) != Some(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str) -> Record {
        Record::new().with("choiceId", id).with("Name", name)
    }

    #[tokio::test]
    async fn test_scan_returns_every_page() {
        let records: Vec<Record> = (0..5).map(|i| row(&format!("c-{}", i), "x")).collect();
        let table = MemoryTable::new("choice", "choiceId")
            .with_page_size(2)
            .with_records(records.clone())
            .await;

        assert_eq!(table.scan().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_scan_empty_table() {
        let table = MemoryTable::new("choice", "choiceId");
        assert!(table.scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_replaces_by_key() {
        let table = MemoryTable::new("choice", "choiceId");
        table.put_item(&row("c-1", "old")).await.unwrap();
        table.put_item(&row("c-1", "new")).await.unwrap();
        table.put_item(&row("c-2", "other")).await.unwrap();

        let records = table.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some(&FieldValue::from("new")));
    }

    #[tokio::test]
    async fn test_put_without_key_fails() {
        let table = MemoryTable::new("choice", "choiceId");
        let result = table.put_item(&Record::new().with("Name", "orphan")).await;
        assert!(result.is_err());
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_by_key() {
        let table = MemoryTable::new("choice", "choiceId")
            .with_records(vec![row("c-1", "a"), row("c-2", "b")])
            .await;

        table
            .delete_item("choiceId", &FieldValue::from("c-1"))
            .await
            .unwrap();

        assert_eq!(table.records().await, vec![row("c-2", "b")]);
        assert!(table.delete_item("Name", &FieldValue::from("b")).await.is_err());
    }
}
