mod analyze;
mod config;
mod db;
mod drafts;
mod errors;
mod llm_client;
mod models;
mod processing;
mod progress;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::local::LocalStore;
use crate::store::remote::{PgRemoteStore, RemoteStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Evolvyng API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the local draft store
    let local = Arc::new(LocalStore::open(&config.local_store_path));
    info!("Local draft store at {}", config.local_store_path);

    // Initialize the remote store when a database is configured
    let remote: Option<Arc<dyn RemoteStore>> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            let remote = PgRemoteStore::new(pool);
            remote.ensure_schema().await?;
            info!("Remote result store initialized");
            Some(Arc::new(remote))
        }
        None => {
            info!("DATABASE_URL not set, running in anonymous/local-only mode");
            None
        }
    };

    // Initialize LLM client
    let analyzer = Arc::new(LlmClient::new(config.openai_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        local,
        remote,
        analyzer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
