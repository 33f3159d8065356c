use crate::config::scrape::ScrapeConfig;
use crate::core::scrape::{render_document, Scraper};
use crate::core::{LoadSummary, ObjectStore, Pipeline, PutOptions, SubjectEntry};
use crate::domain::model::ScrapedPage;
use crate::utils::error::Result;

/// Scrapes every subject page and publishes the results as one JSON object.
pub struct ScrapePipeline<S: ObjectStore> {
    scraper: Scraper,
    storage: S,
}

impl<S: ObjectStore> ScrapePipeline<S> {
    pub fn new(storage: S, config: ScrapeConfig) -> Self {
        Self {
            scraper: Scraper::new(config),
            storage,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait::async_trait]
impl<S: ObjectStore> Pipeline for ScrapePipeline<S> {
    type Extracted = Vec<ScrapedPage>;
    type Transformed = Vec<SubjectEntry>;

    fn name(&self) -> &str {
        "scrape"
    }

    async fn extract(&self) -> Result<Vec<ScrapedPage>> {
        let pages = self.scraper.fetch_all().await?;
        tracing::info!("📥 Fetched {} pages", pages.len());
        Ok(pages)
    }

    async fn transform(&self, pages: Vec<ScrapedPage>) -> Result<Vec<SubjectEntry>> {
        Ok(self.scraper.entries(&pages))
    }

    async fn load(&self, entries: Vec<SubjectEntry>) -> Result<LoadSummary> {
        let config = self.scraper.config();
        let document = render_document(&entries, config.layout);
        let body = serde_json::to_vec(&document)?;

        let options = PutOptions {
            content_type: Some("application/json".to_string()),
            cache_control: config.cache_control.clone(),
        };

        tracing::debug!("Writing {} bytes to {}", body.len(), config.object_key);
        self.storage
            .write_object(&config.object_key, &body, &options)
            .await?;

        Ok(LoadSummary {
            destination: self.storage.location(&config.object_key),
            records_written: entries.len(),
        })
    }
}
