use anyhow::Result;
use mayoche_etl::config::{CreatedAtFormat, SyncConfig};
use mayoche_etl::utils::validation::Validate;
use mayoche_etl::EtlError;
use tempfile::TempDir;

/// 從檔案載入 sync 設定，未列出的 transform 欄位使用預設值
#[tokio::test]
async fn test_sync_config_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("sync.toml");

    tokio::fs::write(
        &config_path,
        r#"
[source]
table_name = "Choice-ntu4w2o4krempmbxvq4tsmdrkq-dev"
region = "ca-central-1"

[destination]
table_name = "choice"
region = "us-east-1"
endpoint_url = "http://localhost:8000"

[transform]
image_url_template = "https://{subject}oftheday.com/"
"#,
    )
    .await?;

    let config = SyncConfig::from_file(&config_path)?;
    config.validate()?;

    assert_eq!(config.destination.table_name, "choice");
    assert_eq!(
        config.destination.endpoint_url.as_deref(),
        Some("http://localhost:8000")
    );
    assert_eq!(config.source.endpoint_url, None);
    assert_eq!(config.transform.source_key, "id");
    assert_eq!(config.transform.destination_key, "choiceId");
    assert_eq!(config.transform.created_at_format, CreatedAtFormat::Legacy);
    Ok(())
}

#[tokio::test]
async fn test_sync_config_rejects_bad_values() -> Result<()> {
    let config = SyncConfig::from_toml_str(
        r#"
[source]
table_name = "old choices"
region = "ca-central-1"

[destination]
table_name = "choice"
region = "us-east-1"
"#,
    )?;

    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        EtlError::InvalidConfigValueError { ref field, .. } if field == "source.table_name"
    ));

    let config = SyncConfig::from_toml_str(
        r#"
[source]
table_name = "old-choices"
region = "ca-central-1"

[destination]
table_name = "choice"
region = "us-east-1"

[transform]
image_url_template = "https://catoftheday.com/"
"#,
    )?;
    assert!(config.validate().is_err());
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let err = SyncConfig::from_file("/definitely/not/here/sync.toml").unwrap_err();
    assert!(matches!(err, EtlError::IoError(_)));
}
