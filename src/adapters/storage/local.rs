use crate::core::{ObjectStore, PutOptions};
use crate::utils::error::Result;
use std::path::Path;

/// Object store backed by a directory; object keys become relative paths.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl ObjectStore for LocalStorage {
    fn location(&self, key: &str) -> String {
        Path::new(&self.base_path).join(key).display().to_string()
    }

    async fn read_object(&self, key: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(key);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_object(&self, key: &str, data: &[u8], options: &PutOptions) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(key);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // 本機檔案沒有 metadata 可存
        if options.cache_control.is_some() {
            tracing::debug!("Ignoring cache-control for local file {}", full_path.display());
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
