use crate::adapters::storage::S3Storage;
use crate::adapters::table::DynamoTable;
use crate::config::sync::TableLocation;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use aws_config::SdkConfig;

/// Shared SDK configuration; `region` overrides the environment's default.
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}

/// 每張表各自有 region，所以各建一個 client
pub async fn dynamo_table(location: &TableLocation) -> DynamoTable {
    let sdk_config = load_sdk_config(Some(&location.region)).await;
    let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
    if let Some(endpoint) = &location.endpoint_url {
        builder = builder.endpoint_url(endpoint);
    }

    DynamoTable::new(
        DynamoClient::from_conf(builder.build()),
        location.table_name.clone(),
    )
}

pub async fn s3_storage(
    bucket: &str,
    region: Option<&str>,
    endpoint_url: Option<&str>,
) -> S3Storage {
    let sdk_config = load_sdk_config(region).await;
    let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
    if let Some(endpoint) = endpoint_url {
        // 自訂端點 (例如 LocalStack) 需要 path-style
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    S3Storage::new(S3Client::from_conf(builder.build()), bucket.to_string())
}
