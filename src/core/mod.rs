pub mod etl;
pub mod locate;
pub mod scrape;
pub mod transform;

pub use crate::domain::model::{FieldValue, LoadSummary, Record, SubjectEntry};
pub use crate::domain::ports::{ObjectStore, Pipeline, PutOptions, TableStore};
pub use crate::utils::error::Result;
