//! dreamtell-api - Dream narration backend service
//!
//! Accepts a free-text dream description, asks a hosted LLM to rewrite it
//! as a short narrative, stores the result, and returns placeholder media
//! URLs for the requested format.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dreamtell_api::{build_router, config, cors_layer, db, AppState};
use dreamtell_common::config::{
    database_path, ensure_root_folder, resolve_root_folder, TomlConfig,
};

/// Command-line arguments for dreamtell-api
#[derive(Parser, Debug)]
#[command(name = "dreamtell-api")]
#[command(about = "Dream narration backend service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "DREAMTELL_PORT")]
    port: u16,

    /// Root folder holding the database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dreamtell_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting dreamtell-api on port {}", args.port);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let toml_config = TomlConfig::load();

    // Resolve root folder (CLI → ENV → TOML → default) and open database
    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    ensure_root_folder(&root_folder).context("Failed to initialize root folder")?;

    let db_path = database_path(&root_folder);
    info!("Database: {}", db_path.display());

    let db_pool = db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // Story client (API key required before accepting requests)
    let api_key = config::resolve_llm_api_key(&toml_config)?;
    let story = config::build_story_client(api_key, &toml_config)?;
    info!("Story client ready (model: {})", story.model());

    let state = AppState::new(db_pool, Arc::new(story));

    let cors_origins = config::resolve_cors_origins(&toml_config);
    info!("CORS origins: {}", cors_origins.join(", "));

    let app = build_router(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors_layer(&cors_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
