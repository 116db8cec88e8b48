use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

#[tokio::main]
async fn main() {
    let config = ingest::Config::parse();

    let level = tracing::Level::from(config.log_level);
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(move |meta| {
            (meta.target().starts_with("ingest") || meta.target().starts_with("analysis"))
                && *meta.level() <= level
        }));
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("Setting up logging: {}", e);
        std::process::exit(1);
    }

    tracing::info!(?config, "Starting...");

    if let Err(e) = tokio::fs::create_dir_all(&config.results).await {
        tracing::error!(path = %config.results.display(), %e, "Creating results directory");
        std::process::exit(1);
    }

    let scheduler = ingest::scheduler::Scheduler::new(
        &config,
        Arc::new(ingest::catalog::DirectoryCatalog::new(config.recordings.clone())),
        Box::new(ingest::storage::FileStorage::new(config.recordings.clone())),
        Arc::new(ingest::results::FileResultStore::new(config.results.clone())),
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(%e, "Waiting for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    let stats = scheduler.run(config.once, shutdown).await;

    tracing::info!(processed = stats.processed, failed = stats.failed, "Stopped");
}
