use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use games2play::config::AppConfig;
use games2play::routes::{self, AppState};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("games2play=debug,warp=info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🎮 Starting games2play...");
    info!("   Guess That Trend! / Food Guessing Game");
    info!("");

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    info!("Google Trends: {} (hl: {}, tz: {})", config.trends_base_url, config.trends_hl, config.trends_tz);
    info!("Upstream deadline: {} s", config.upstream_timeout.as_secs());
    info!("Word list: {}", config.words_path.display());
    info!("Product catalog: {}", config.products_path.display());

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState::from_config(&config));

    let (addr, server) = match warp::serve(routes::routes(state)).try_bind_with_graceful_shutdown(bind_addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    }) {
        Ok(bound) => bound,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            return;
        }
    };

    info!("Listening on http://{}", addr);
    server.await;
    info!("Server stopped");
}
