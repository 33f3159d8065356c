pub mod scrape;
pub mod table_sync;

pub use scrape::ScrapePipeline;
pub use table_sync::TableSyncPipeline;
