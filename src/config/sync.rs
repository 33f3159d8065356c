use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_non_empty_string, validate_table_name, validate_url,
    validate_url_template, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 舊資料沒有圖片欄位，用這個模板補上
pub const DEFAULT_SITE_TEMPLATE: &str = "https://{subject}oftheday.com/";

pub const DEFAULT_SOURCE_TABLE: &str = "Choice-ntu4w2o4krempmbxvq4tsmdrkq-dev";
pub const DEFAULT_SOURCE_REGION: &str = "ca-central-1";
pub const DEFAULT_DESTINATION_TABLE: &str = "choice";
pub const DEFAULT_DESTINATION_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub source: TableLocation,
    pub destination: TableLocation,
    #[serde(default)]
    pub transform: TransformOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLocation {
    pub table_name: String,
    pub region: String,
    /// Override for local DynamoDB or other compatible endpoints.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl TableLocation {
    pub fn new(table_name: &str, region: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            region: region.to_string(),
            endpoint_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub source_key: String,
    pub destination_key: String,
    pub image_url_template: String,
    pub created_at_format: CreatedAtFormat,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            source_key: "id".to_string(),
            destination_key: "choiceId".to_string(),
            image_url_template: DEFAULT_SITE_TEMPLATE.to_string(),
            created_at_format: CreatedAtFormat::Legacy,
        }
    }
}

/// How `createdAt` is rewritten into `CreatedAt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CreatedAtFormat {
    /// Replace every `-` with `/`, nothing else.
    #[default]
    Legacy,
    /// Parse RFC 3339 and render `YYYY/MM/DD:HH:MM:SS +0000`.
    Documented,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source: TableLocation::new(DEFAULT_SOURCE_TABLE, DEFAULT_SOURCE_REGION),
            destination: TableLocation::new(DEFAULT_DESTINATION_TABLE, DEFAULT_DESTINATION_REGION),
            transform: TransformOptions::default(),
        }
    }
}

impl SyncConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: SyncConfig =
            toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        // 空字串視為未設定
        for location in [&mut config.source, &mut config.destination] {
            if location
                .endpoint_url
                .as_deref()
                .is_some_and(|url| url.trim().is_empty())
            {
                location.endpoint_url = None;
            }
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${DYNAMODB_ENDPOINT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

fn validate_location(prefix: &str, location: &TableLocation) -> Result<()> {
    validate_table_name(&format!("{}.table_name", prefix), &location.table_name)?;
    validate_aws_region(&format!("{}.region", prefix), &location.region)?;
    if let Some(endpoint) = &location.endpoint_url {
        validate_url(&format!("{}.endpoint_url", prefix), endpoint)?;
    }
    Ok(())
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        validate_location("source", &self.source)?;
        validate_location("destination", &self.destination)?;

        validate_non_empty_string("transform.source_key", &self.transform.source_key)?;
        validate_non_empty_string("transform.destination_key", &self.transform.destination_key)?;
        validate_url_template(
            "transform.image_url_template",
            &self.transform.image_url_template,
        )?;

        if self.source == self.destination {
            return Err(EtlError::ConfigValidationError {
                field: "destination".to_string(),
                message: "Destination must differ from source; the sync clears it first"
                    .to_string(),
            });
        }

        tracing::debug!("✅ Sync configuration validation passed");
        Ok(())
    }
}
