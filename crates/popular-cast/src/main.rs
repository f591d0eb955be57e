//! # popular-cast
//!
//! Prints the distinct cast of one discover page as JSON, most popular first.
//!
//! ```bash
//! TMDB_API_KEY=... RUST_LOG=info cargo run -p popular-cast -- --page 2 --policy best-effort
//! ```
//!
//! Exits non-zero when the run fails. Under `--policy best-effort` skipped movies are logged at
//! `warn` and the partial result is still printed.

use actor_store::tracing::setup_tracing;
use clap::Parser;
use popular_cast::cli::Cli;
use popular_cast::{Aggregator, TmdbClient};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let cli = Cli::parse();
    let api_key = cli.api_key().map_err(|e| e.to_string())?;

    let source = TmdbClient::new(cli.tmdb_config()).map_err(|e| e.to_string())?;
    let aggregator =
        Aggregator::new(source, cli.aggregator_config()).map_err(|e| e.to_string())?;

    info!(
        page = aggregator.config().page,
        sort_by = %aggregator.config().sort_by,
        concurrency = aggregator.config().concurrency,
        "Starting aggregation"
    );

    let span = tracing::info_span!("aggregation");
    let aggregate = async { aggregator.run(&api_key).await }
        .instrument(span)
        .await
        .map_err(|e| {
            error!(error = %e, "Aggregation failed");
            e.to_string()
        })?;

    if !aggregate.is_complete() {
        warn!(
            skipped = ?aggregate.failed_movie_ids,
            "Some movies were skipped"
        );
    }
    info!(actors = aggregate.actors.len(), "Aggregation complete");

    let json = serde_json::to_string_pretty(&aggregate.sorted_actors()).map_err(|e| e.to_string())?;
    println!("{json}");

    Ok(())
}
