use crate::config::scrape::{OutputLayout, ScrapeConfig, DEFAULT_OBJECT_KEY, DEFAULT_SUBJECTS};
use crate::config::sync::{CreatedAtFormat, SyncConfig, DEFAULT_SITE_TEMPLATE};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "table-sync")]
#[command(about = "Copy and reshape every record from the source table into the destination table")]
pub struct SyncArgs {
    /// Path to a TOML configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub source_table: Option<String>,

    #[arg(long)]
    pub source_region: Option<String>,

    #[arg(long)]
    pub destination_table: Option<String>,

    #[arg(long)]
    pub destination_region: Option<String>,

    /// Endpoint override applied to both tables (e.g. local DynamoDB)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    #[arg(long, value_enum)]
    pub created_at_format: Option<CreatedAtFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl SyncArgs {
    pub fn into_config(self) -> Result<SyncConfig> {
        let mut config = match &self.config {
            Some(path) => SyncConfig::from_file(path)?,
            None => SyncConfig::default(),
        };

        if let Some(table) = self.source_table {
            config.source.table_name = table;
        }
        if let Some(region) = self.source_region {
            config.source.region = region;
        }
        if let Some(table) = self.destination_table {
            config.destination.table_name = table;
        }
        if let Some(region) = self.destination_region {
            config.destination.region = region;
        }
        if let Some(endpoint) = self.endpoint_url {
            config.source.endpoint_url = Some(endpoint.clone());
            config.destination.endpoint_url = Some(endpoint);
        }
        if let Some(format) = self.created_at_format {
            config.transform.created_at_format = format;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "scrape-images")]
#[command(about = "Find today's image on each \"of the day\" site and print its URL")]
pub struct ScrapeArgs {
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SUBJECTS.map(String::from))]
    pub subjects: Vec<String>,

    #[arg(long, default_value = DEFAULT_SITE_TEMPLATE)]
    pub site_url_template: String,

    #[arg(long, value_enum, default_value_t = OutputLayout::Flat)]
    pub layout: OutputLayout,

    /// Write the document into this directory
    #[arg(long, conflicts_with = "bucket")]
    pub output_dir: Option<String>,

    /// Publish the document to this S3 bucket
    #[arg(long)]
    pub bucket: Option<String>,

    #[arg(long, default_value = DEFAULT_OBJECT_KEY)]
    pub object_key: String,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub endpoint_url: Option<String>,

    #[arg(long)]
    pub cache_control: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ScrapeArgs {
    pub fn to_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            subjects: self.subjects.clone(),
            site_url_template: self.site_url_template.clone(),
            layout: self.layout,
            bucket: self.bucket.clone(),
            object_key: self.object_key.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            cache_control: self.cache_control.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_args_override_defaults() {
        let args = SyncArgs::parse_from([
            "table-sync",
            "--destination-table",
            "choice-staging",
            "--endpoint-url",
            "http://localhost:8000",
            "--created-at-format",
            "documented",
        ]);
        let config = args.into_config().unwrap();

        assert_eq!(config.source.table_name, crate::config::sync::DEFAULT_SOURCE_TABLE);
        assert_eq!(config.destination.table_name, "choice-staging");
        assert_eq!(
            config.source.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.transform.created_at_format, CreatedAtFormat::Documented);
    }

    #[test]
    fn test_scrape_args_defaults() {
        let args = ScrapeArgs::parse_from(["scrape-images"]);
        let config = args.to_config();

        assert_eq!(config.subjects, vec!["cat", "dog", "pet"]);
        assert_eq!(config.site_url_template, "https://{subject}oftheday.com/");
        assert_eq!(config.bucket, None);
        assert_eq!(config.object_key, "animals.json");
    }

    #[test]
    fn test_scrape_args_output_dir_conflicts_with_bucket() {
        let result = ScrapeArgs::try_parse_from([
            "scrape-images",
            "--output-dir",
            "./out",
            "--bucket",
            "mayoche-data",
        ]);
        assert!(result.is_err());
    }
}
