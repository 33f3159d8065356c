pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{ScrapeArgs, SyncArgs};
pub use config::{ScrapeConfig, SyncConfig};

pub use adapters::storage::LocalStorage;
#[cfg(feature = "aws")]
pub use adapters::storage::S3Storage;
#[cfg(feature = "aws")]
pub use adapters::table::DynamoTable;
pub use adapters::table::MemoryTable;

pub use app::pipelines::{ScrapePipeline, TableSyncPipeline};
pub use crate::core::etl::EtlEngine;
pub use utils::error::{EtlError, Result};
