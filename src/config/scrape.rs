use crate::config::sync::DEFAULT_SITE_TEMPLATE;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_non_empty_string, validate_path, validate_s3_bucket_name,
    validate_url, validate_url_template, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const DEFAULT_SUBJECTS: [&str; 3] = ["cat", "dog", "pet"];
pub const DEFAULT_OBJECT_KEY: &str = "animals.json";

/// Shape of each entry in the published document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputLayout {
    /// `{"name", "image"}`
    #[default]
    Flat,
    /// `{"name", "image_url", "year", "month", "day"}`
    Dated,
}

impl FromStr for OutputLayout {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(OutputLayout::Flat),
            "dated" => Ok(OutputLayout::Dated),
            other => Err(EtlError::InvalidConfigValueError {
                field: "OUTPUT_LAYOUT".to_string(),
                value: other.to_string(),
                reason: "Expected 'flat' or 'dated'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub subjects: Vec<String>,
    pub site_url_template: String,
    pub layout: OutputLayout,
    pub bucket: Option<String>,
    pub object_key: String,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub cache_control: Option<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
            site_url_template: DEFAULT_SITE_TEMPLATE.to_string(),
            layout: OutputLayout::Flat,
            bucket: None,
            object_key: DEFAULT_OBJECT_KEY.to_string(),
            region: None,
            endpoint_url: None,
            cache_control: None,
        }
    }
}

impl ScrapeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// 由任意的變數查詢函式建立，方便測試時不必動到行程環境變數
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bucket = var("BUCKET_NAME").ok_or_else(|| EtlError::ConfigError {
            message: "BUCKET_NAME environment variable is required".to_string(),
        })?;

        let subjects = match var("SUBJECTS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.subjects,
        };

        let layout = match var("OUTPUT_LAYOUT") {
            Some(layout) => layout.parse()?,
            None => OutputLayout::default(),
        };

        Ok(Self {
            subjects,
            site_url_template: var("SITE_URL_TEMPLATE").unwrap_or(defaults.site_url_template),
            layout,
            bucket: Some(bucket),
            object_key: var("OBJECT_KEY").unwrap_or(defaults.object_key),
            region: var("S3_REGION"),
            endpoint_url: var("S3_ENDPOINT_URL"),
            cache_control: var("CACHE_CONTROL"),
        })
    }

    pub fn page_url(&self, subject: &str) -> String {
        self.site_url_template.replace("{subject}", subject)
    }
}

impl Validate for ScrapeConfig {
    fn validate(&self) -> Result<()> {
        if self.subjects.is_empty() {
            return Err(EtlError::InvalidConfigValueError {
                field: "subjects".to_string(),
                value: String::new(),
                reason: "At least one subject is required".to_string(),
            });
        }
        for subject in &self.subjects {
            validate_non_empty_string("subjects", subject)?;
        }

        validate_url_template("site_url_template", &self.site_url_template)?;
        validate_path("object_key", &self.object_key)?;

        if let Some(bucket) = &self.bucket {
            validate_s3_bucket_name("bucket", bucket)?;
        }
        if let Some(region) = &self.region {
            validate_aws_region("region", region)?;
        }
        if let Some(endpoint) = &self.endpoint_url {
            validate_url("endpoint_url", endpoint)?;
        }

        tracing::debug!("✅ Scrape configuration validation passed");
        Ok(())
    }
}
