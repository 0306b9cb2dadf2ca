use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod db;
mod models;
mod services;
mod store;

use api::telegram::TelegramClient;
use db::watch::PollWatcher;
use db::MySqlStore;
use services::event_service::EventProcessor;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("txnotify=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap()))
        .with_target(true)
        .init();

    info!("🤖 Starting txnotify relay...");

    // Initialize database
    info!("Initializing database...");
    let pool = match db::init_db().await {
        Ok(p) => {
            info!("Database initialized successfully");
            p
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let token = std::env::var("BOT_TOKEN").expect("BOT_TOKEN not set");
    let client = match std::env::var("TELEGRAM_API_URL") {
        Ok(url) => TelegramClient::with_base_url(token, url),
        Err(_) => TelegramClient::new(token),
    };

    let poll_interval = std::env::var("POLL_INTERVAL_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1000);

    let store = Arc::new(MySqlStore::new(pool.clone()));
    let processor = Arc::new(EventProcessor::new(store, Arc::new(client)));
    let watcher = PollWatcher::new(pool, Duration::from_millis(poll_interval));

    let listeners = services::subscription_service::spawn_listeners(&watcher, processor);
    info!("🚀 Relay is watching deposit and withdrawal requests...");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    // Tear down the subscriptions; in-flight deliveries may still complete
    info!("Shutdown requested, closing subscriptions...");
    for listener in listeners {
        listener.abort();
    }
}
