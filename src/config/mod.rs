#[cfg(feature = "cli")]
pub mod cli;
pub mod scrape;
pub mod sync;

#[cfg(feature = "cli")]
pub use cli::{ScrapeArgs, SyncArgs};
pub use scrape::{OutputLayout, ScrapeConfig};
pub use sync::{CreatedAtFormat, SyncConfig, TableLocation, TransformOptions};
