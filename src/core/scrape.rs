use crate::config::scrape::{OutputLayout, ScrapeConfig};
use crate::core::locate::{image_date, locate_image};
use crate::domain::model::{ScrapedPage, SubjectEntry};
use crate::utils::error::Result;
use reqwest::Client;
use serde_json::{json, Value};

/// Fetches the subject pages one after another and turns them into entries.
pub struct Scraper {
    client: Client,
    config: ScrapeConfig,
}

impl Scraper {
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Single GET; non-2xx responses are errors.
    pub async fn fetch_page(&self, subject: &str) -> Result<ScrapedPage> {
        let page_url = self.config.page_url(subject);
        tracing::debug!("Fetching {} page: {}", subject, page_url);

        let response = self.client.get(&page_url).send().await?;
        tracing::debug!("Page response status: {}", response.status());
        let html = response.error_for_status()?.text().await?;

        Ok(ScrapedPage {
            subject: subject.to_string(),
            page_url,
            html,
        })
    }

    /// 任何一頁失敗就整批放棄
    pub async fn fetch_all(&self) -> Result<Vec<ScrapedPage>> {
        let mut pages = Vec::with_capacity(self.config.subjects.len());
        for subject in &self.config.subjects {
            pages.push(self.fetch_page(subject).await?);
        }
        Ok(pages)
    }

    pub fn entries(&self, pages: &[ScrapedPage]) -> Vec<SubjectEntry> {
        pages.iter().map(entry_for_page).collect()
    }
}

pub fn entry_for_page(page: &ScrapedPage) -> SubjectEntry {
    let image_url = locate_image(&page.html, &page.page_url, &page.subject);
    match &image_url {
        Some(url) => tracing::info!("🖼️  {}: {}", page.subject, url),
        None => tracing::warn!("No image of the day found for {} at {}", page.subject, page.page_url),
    }

    let date = image_url.as_deref().and_then(image_date);
    SubjectEntry {
        name: page.subject.clone(),
        image_url,
        date,
    }
}

/// The published document: one object per subject, in subject order.
pub fn render_document(entries: &[SubjectEntry], layout: OutputLayout) -> Value {
    let items = entries
        .iter()
        .map(|entry| match layout {
            OutputLayout::Flat => json!({
                "name": entry.name,
                "image": entry.image_url,
            }),
            OutputLayout::Dated => json!({
                "name": entry.name,
                "image_url": entry.image_url,
                "year": entry.date.as_ref().map(|d| d.year.as_str()),
                "month": entry.date.as_ref().map(|d| d.month.as_str()),
                "day": entry.date.as_ref().map(|d| d.day.as_str()),
            }),
        })
        .collect();

    Value::Array(items)
}
