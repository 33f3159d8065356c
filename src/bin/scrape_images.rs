use clap::Parser;
use mayoche_etl::adapters::aws;
use mayoche_etl::core::scrape::Scraper;
use mayoche_etl::core::{ObjectStore, Pipeline, SubjectEntry};
use mayoche_etl::utils::{logger, validation::Validate};
use mayoche_etl::{LocalStorage, Result, ScrapeArgs, ScrapeConfig, ScrapePipeline};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = ScrapeArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let config = args.to_config();
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&args, config).await {
        tracing::error!(
            "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run(args: &ScrapeArgs, config: ScrapeConfig) -> Result<()> {
    if let Some(dir) = &args.output_dir {
        let pipeline = ScrapePipeline::new(LocalStorage::new(dir.clone()), config);
        return scrape_and_publish(&pipeline).await;
    }

    if let Some(bucket) = config.bucket.clone() {
        let storage =
            aws::s3_storage(&bucket, config.region.as_deref(), config.endpoint_url.as_deref())
                .await;
        let pipeline = ScrapePipeline::new(storage, config);
        return scrape_and_publish(&pipeline).await;
    }

    // 沒有輸出目標時只印出網址
    let scraper = Scraper::new(config);
    let pages = scraper.fetch_all().await?;
    print_entries(&scraper.entries(&pages));
    Ok(())
}

async fn scrape_and_publish<S: ObjectStore>(pipeline: &ScrapePipeline<S>) -> Result<()> {
    let pages = pipeline.extract().await?;
    let entries = pipeline.transform(pages).await?;
    print_entries(&entries);

    let summary = pipeline.load(entries).await?;
    tracing::info!(
        "📁 Wrote {} entries to {}",
        summary.records_written,
        summary.destination
    );
    Ok(())
}

fn print_entries(entries: &[SubjectEntry]) {
    for entry in entries {
        println!("{}", entry_line(entry));
    }
}

/// One stdout line per subject, matched or not.
fn entry_line(entry: &SubjectEntry) -> String {
    match &entry.image_url {
        Some(url) => url.clone(),
        None => format!("{}: no image", entry.name),
    }
}
