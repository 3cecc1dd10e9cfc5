//! Byte LRU - response cache workload driver
//!
//! Runs a fetch-or-fill workload against one shared cache from several tokio
//! tasks, the way a host process caching rendered responses would, and
//! prints the resulting statistics as JSON.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use byte_lru::{Config, LruCache};

const WORKERS: usize = 8;
const REQUESTS_PER_WORKER: usize = 2_000;
const ROUTES: usize = 512;

/// Main entry point for the workload driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load cache capacities from environment variables
/// 3. Run the workers to completion
/// 4. Report statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "byte_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_bytes={}, max_items={}",
        config.max_bytes, config.max_items
    );

    let cache = Arc::new(config.build().context("invalid cache configuration")?);

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| tokio::spawn(run_worker(Arc::clone(&cache), worker)))
        .collect();

    let mut rendered = 0;
    for handle in handles {
        rendered += handle.await.context("worker task failed")?;
    }

    let stats = cache.stats();
    info!(
        "Workload finished: rendered={}, hit_rate={:.3}, evictions={}",
        rendered,
        stats.hit_rate(),
        stats.evictions
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Serves requests for one worker and returns how many it had to render.
async fn run_worker(cache: Arc<LruCache>, worker: usize) -> usize {
    let mut rendered = 0;

    for i in 0..REQUESTS_PER_WORKER {
        // Quadratic stride skews traffic toward a hot subset of routes.
        let route = (worker * 31 + i * i) % ROUTES;
        let key = format!("/route/{route}");

        if cache.get(&key).is_none() {
            let body = render(route);
            debug!(key = %key, len = body.len(), "cache fill");
            cache.set(key, body);
            rendered += 1;
        }

        if i % 64 == 0 {
            tokio::task::yield_now().await;
        }
    }

    rendered
}

/// Stand-in for an expensive response render.
fn render(route: usize) -> Vec<u8> {
    format!("<html><body>route {route}</body></html>")
        .repeat(1 + route % 16)
        .into_bytes()
}
