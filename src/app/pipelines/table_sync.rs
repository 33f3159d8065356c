use crate::config::sync::TransformOptions;
use crate::core::transform::{rename_identity, transform_all};
use crate::core::{LoadSummary, Pipeline, Record, TableStore};
use crate::domain::model::{BatchFailure, BatchReport};
use crate::utils::error::{EtlError, Result};

/// Copies every row of `source` into `destination`, reshaped for the new
/// schema. The destination is emptied first.
pub struct TableSyncPipeline<Src: TableStore, Dst: TableStore> {
    source: Src,
    destination: Dst,
    options: TransformOptions,
}

impl<Src: TableStore, Dst: TableStore> TableSyncPipeline<Src, Dst> {
    pub fn new(source: Src, destination: Dst, options: TransformOptions) -> Self {
        Self {
            source,
            destination,
            options,
        }
    }

    pub fn source(&self) -> &Src {
        &self.source
    }

    pub fn destination(&self) -> &Dst {
        &self.destination
    }

    /// Deletes every destination row by its key, stopping at the first failure.
    pub async fn cleanup_destination(&self) -> Result<BatchReport> {
        let key_field = &self.options.destination_key;
        let existing = self.destination.scan().await?;
        let mut report = BatchReport::new(existing.len());

        for (index, record) in existing.iter().enumerate() {
            let outcome = match record.get(key_field) {
                Some(key) => self.destination.delete_item(key_field, key).await,
                None => Err(EtlError::MissingFieldError {
                    record: index,
                    field: key_field.clone(),
                }),
            };

            if let Err(error) = outcome {
                tracing::error!("❌ Cleanup stopped at record {}: {}", index, error);
                report.failure = Some(BatchFailure { index, error });
                break;
            }
            report.succeeded += 1;
        }

        tracing::info!(
            "🧹 Deleted {}/{} records from {}",
            report.succeeded,
            report.attempted,
            self.destination.table_name()
        );
        Ok(report)
    }

    /// Puts every record in order, stopping at the first failure.
    pub async fn write_records(&self, records: &[Record]) -> BatchReport {
        let mut report = BatchReport::new(records.len());

        for (index, record) in records.iter().enumerate() {
            if let Err(error) = self.destination.put_item(record).await {
                tracing::error!("❌ Write stopped at record {}: {}", index, error);
                report.failure = Some(BatchFailure { index, error });
                break;
            }
            report.succeeded += 1;
        }

        tracing::info!(
            "📝 Wrote {}/{} records to {}",
            report.succeeded,
            report.attempted,
            self.destination.table_name()
        );
        report
    }
}

#[async_trait::async_trait]
impl<Src: TableStore, Dst: TableStore> Pipeline for TableSyncPipeline<Src, Dst> {
    type Extracted = Vec<Record>;
    type Transformed = Vec<Record>;

    fn name(&self) -> &str {
        "table-sync"
    }

    async fn extract(&self) -> Result<Vec<Record>> {
        println!("Get source database items -> {}", self.source.table_name());

        let mut records = self.source.scan().await?;
        for (index, record) in records.iter_mut().enumerate() {
            rename_identity(
                record,
                &self.options.source_key,
                &self.options.destination_key,
                index,
            )?;
        }

        tracing::info!(
            "📥 Read {} records from {}",
            records.len(),
            self.source.table_name()
        );
        Ok(records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<Vec<Record>> {
        // 先全部轉換成功才動目標表
        let transformed = transform_all(&data, &self.options)?;
        tracing::debug!("Transformed {} records", transformed.len());
        Ok(transformed)
    }

    async fn load(&self, records: Vec<Record>) -> Result<LoadSummary> {
        let destination = self.destination.table_name().to_string();

        println!("Cleanup destination database -> {}", destination);
        self.cleanup_destination().await?.into_result("delete")?;

        println!("Sync items to destination database -> {}", destination);
        let written = self.write_records(&records).await.into_result("put")?;

        Ok(LoadSummary {
            destination,
            records_written: written,
        })
    }
}
