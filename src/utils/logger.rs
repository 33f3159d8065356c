use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "mayoche_etl=info";
const VERBOSE_DIRECTIVE: &str = "mayoche_etl=debug,info";

/// `RUST_LOG` wins over the built-in directive.
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Shared fmt layer: message only, no target, thread or source location.
fn bare_layer<S>() -> fmt::Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    let directive = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };

    // 進度行走 stdout，日誌一律寫到 stderr
    tracing_subscriber::registry()
        .with(env_filter(directive))
        .with(bare_layer().with_writer(std::io::stderr).compact())
        .init();
}

pub fn init_lambda_logger() {
    // CloudWatch 自帶時間戳
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVE))
        .with(bare_layer().without_time().json())
        .init();
}
