use crate::core::{ObjectStore, PutOptions};
use crate::utils::error::{EtlError, Result};
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl ObjectStore for S3Storage {
    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }

    async fn read_object(&self, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                EtlError::StorageError {
                    key: self.location(key),
                    message: format!(
                        "{} ({})",
                        service_error,
                        service_error.code().unwrap_or("unknown")
                    ),
                }
            })?;

        let data = resp.body.collect().await.map_err(|e| EtlError::StorageError {
            key: self.location(key),
            message: format!("Failed to collect S3 data: {}", e),
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_object(&self, key: &str, data: &[u8], options: &PutOptions) -> Result<()> {
        tracing::debug!(
            "Writing {} bytes to {} (cache-control: {:?})",
            data.len(),
            self.location(key),
            options.cache_control
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .set_content_type(options.content_type.clone())
            .set_cache_control(options.cache_control.clone())
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                EtlError::StorageError {
                    key: self.location(key),
                    message: format!(
                        "{} ({})",
                        service_error,
                        service_error.code().unwrap_or("unknown")
                    ),
                }
            })?;

        Ok(())
    }
}
