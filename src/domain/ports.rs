use crate::domain::model::{FieldValue, LoadSummary, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Extra metadata attached to an object write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
}

pub trait ObjectStore: Send + Sync {
    /// Human readable location of `key`, used in logs and load summaries.
    fn location(&self, key: &str) -> String;
    fn read_object(&self, key: &str)
        -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_object(
        &self,
        key: &str,
        data: &[u8],
        options: &PutOptions,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait TableStore: Send + Sync {
    fn table_name(&self) -> &str;
    /// Full table contents; implementations follow pagination to the end.
    fn scan(&self) -> impl std::future::Future<Output = Result<Vec<Record>>> + Send;
    /// Unconditional insert-or-replace.
    fn put_item(&self, record: &Record) -> impl std::future::Future<Output = Result<()>> + Send;
    fn delete_item(
        &self,
        key_field: &str,
        key: &FieldValue,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;
    type Transformed: Send;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    async fn load(&self, result: Self::Transformed) -> Result<LoadSummary>;
}
