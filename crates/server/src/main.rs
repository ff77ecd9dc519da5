use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dorkforge_core::{
    create_generator, load_config, validate_config, DorkEngine, DorkGenerator, TemplateRepository,
};
use dorkforge_server::api::create_router;
use dorkforge_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("DorkForge v{}", VERSION);

    // Determine config path
    let config_path = std::env::var("DORKFORGE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("dorkforge.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Template directory: {:?}", config.templates.dir);
    info!("Default engine: {}", config.generation.default_engine);

    // Template store and generation engine
    let repository = TemplateRepository::new(&config.templates.dir)
        .with_context(|| format!("Failed to open templates in {:?}", config.templates.dir))?;
    match repository.all_categories() {
        Ok(categories) => info!("Found {} template categories", categories.len()),
        Err(e) => warn!("Could not list template categories: {}", e),
    }
    let engine = DorkEngine::new(Arc::new(repository), config.generation.validate);

    // Create AI generator if configured
    let ai: Option<Arc<dyn DorkGenerator>> = match &config.ai {
        Some(ai_config) => match create_generator(ai_config) {
            Ok(generator) => {
                if !generator.is_available().await {
                    warn!("AI provider {} is not reachable yet", generator.name());
                }
                Some(Arc::from(generator))
            }
            Err(e) => {
                error!("Failed to initialize AI provider: {}", e);
                None
            }
        },
        None => {
            info!("No AI provider configured");
            None
        }
    };

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), engine, ai));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
