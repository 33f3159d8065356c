#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use mayoche_etl::adapters::aws;
#[cfg(feature = "lambda")]
use mayoche_etl::utils::{logger, validation::validate_required_field, validation::Validate};
#[cfg(feature = "lambda")]
use mayoche_etl::core::ObjectStore;
#[cfg(feature = "lambda")]
use mayoche_etl::{EtlEngine, ScrapeConfig, ScrapePipeline};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

/// Scheduled events carry none of these; unknown fields are ignored.
#[cfg(feature = "lambda")]
#[derive(Debug, Default, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub object_key: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl Request {
    fn apply(self, config: &mut ScrapeConfig) {
        if let Some(bucket) = self.bucket {
            config.bucket = Some(bucket);
        }
        if let Some(key) = self.object_key {
            config.object_key = key;
        }
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<serde_json::Value>) -> Result<Response, Error> {
    tracing::info!("Starting scrape Lambda function");

    // 事件內容只用來覆蓋設定，不修改環境變數
    let request: Request = serde_json::from_value(event.payload).unwrap_or_default();

    let mut config = ScrapeConfig::from_env()?;
    request.apply(&mut config);
    config.validate()?;

    let bucket = validate_required_field("bucket", &config.bucket)?.clone();
    let storage = aws::s3_storage(
        &bucket,
        config.region.as_deref(),
        config.endpoint_url.as_deref(),
    )
    .await;

    publish(storage, config).await
}

/// Scrapes every subject and writes the document to `storage`.
#[cfg(feature = "lambda")]
async fn publish<S: ObjectStore>(storage: S, config: ScrapeConfig) -> Result<Response, Error> {
    let engine = EtlEngine::new(ScrapePipeline::new(storage, config));
    let summary = engine.run().await?;

    tracing::info!(
        "Scrape Lambda function completed: {} entries written to {}",
        summary.records_written,
        summary.destination
    );

    Ok(Response {
        status_code: 200,
        body: serde_json::to_string("Web scraping completed")?,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
