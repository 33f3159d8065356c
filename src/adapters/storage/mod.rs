pub mod local;
#[cfg(feature = "aws")]
pub mod s3;

pub use local::LocalStorage;
#[cfg(feature = "aws")]
pub use s3::S3Storage;
