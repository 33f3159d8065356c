// Adapters layer: concrete implementations for external systems (object storage, tables, AWS clients).

#[cfg(feature = "aws")]
pub mod aws;
pub mod storage;
pub mod table;
