mod file_source;

use anyhow::Context;
use awardscan_core::source::AvailabilitySource;
use awardscan_engine::{ScanPolicy, Scanner};
use awardscan_store::seen_cache::SeenCache;
use file_source::JsonFileSource;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "awardscan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = awardscan_store::app_config::Config::load()
        .context("failed to load configuration")?;
    let policy = ScanPolicy::from_config(&config).context("invalid scan policy")?;
    tracing::info!(
        min_return_days = policy.min_return_days,
        max_return_days = policy.max_return_days,
        flex_days = policy.flex_days,
        "starting awardscan"
    );

    let source = JsonFileSource::new(&config.source.outbound_path, &config.source.return_path);
    let outbound_rows = source
        .outbound_records()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to read outbound availability rows")?;
    let return_rows = source
        .return_records()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to read return availability rows")?;

    let cache_path = PathBuf::from(&config.dedup.cache_path);
    let mut cache = SeenCache::load(&cache_path, policy.dedup_ttl_days);

    let today = chrono::Utc::now().date_naive();
    let scanner = Scanner::new(policy);
    let report = scanner.run(&outbound_rows, &return_rows, &mut cache, today);

    // The report on stdout is the hand-off to the external renderer/mailer.
    println!("{}", serde_json::to_string_pretty(&report)?);

    // A failed cache write is logged, never fatal.
    if let Err(err) = cache.save(&cache_path) {
        tracing::warn!(path = %cache_path.display(), error = %err, "seen-cache write failed");
    }

    Ok(())
}
