//! Pixelbadger Server: SharePoint directory-tree proxy and image OCR API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use pixelbadger_core::config::{AppConfig, DriveProviderKind};
use pixelbadger_core::error::AppError;
use pixelbadger_remote::{GraphDriveProvider, MemoryDriveProvider, OpenAiCompletionClient};
use pixelbadger_service::{OcrService, SharePointService};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then validate it.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PIXELBADGER_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Pixelbadger v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Drive provider ───────────────────────────────────
    let sharepoint = match config.sharepoint.provider {
        DriveProviderKind::Graph => {
            tracing::info!(
                base_url = %config.sharepoint.graph_base_url,
                forward_user_token = config.sharepoint.forward_user_token,
                "Using Microsoft Graph drive provider"
            );
            SharePointService::new(Arc::new(GraphDriveProvider::new(&config.sharepoint)?))
        }
        DriveProviderKind::Memory => {
            let drive = match &config.sharepoint.fixture_path {
                Some(path) => MemoryDriveProvider::from_fixture(path).await?,
                None => MemoryDriveProvider::new(),
            };
            tracing::info!("Using in-memory drive provider");
            SharePointService::new(Arc::new(drive))
        }
    };

    // ── Step 2: Completion client ────────────────────────────────
    let completion = OpenAiCompletionClient::new(&config.openai)?;
    tracing::info!(model = %config.openai.model, "Completion client initialized");
    let ocr = OcrService::new(Arc::new(completion));

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app_state = pixelbadger_api::AppState::new(config, sharepoint, ocr);
    let app = pixelbadger_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Pixelbadger server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => return server_result(result),
        _ = shutdown_rx.changed() => {}
    }

    match tokio::time::timeout(grace, server).await {
        Ok(result) => server_result(result)?,
        Err(_) => tracing::warn!(
            grace_seconds = grace.as_secs(),
            "In-flight requests did not finish before the shutdown deadline"
        ),
    }

    tracing::info!("Pixelbadger server shut down");
    Ok(())
}

fn server_result(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    result
        .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
