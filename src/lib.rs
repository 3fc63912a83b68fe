pub mod adapters;
pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod layout;
pub mod models;
pub mod ports;
pub mod raster;
pub mod relay;
pub mod snapshot;
pub mod state;
pub mod submission;
pub mod tracking;

use std::sync::Arc;

use adapters::FileStore;
use error::AppError;
use state::{Collaborators, Workbench};

/// JerseyLab library entry point.
///
/// Sets up logging and configuration, mounts a workbench over the on-disk
/// store and prints the restored customization as JSON. Embedding shells
/// build their own [`Workbench`] with their own collaborators instead.
pub fn run() -> Result<(), AppError> {
    // ── Tracing setup (must happen before anything else) ────────────────────
    //
    // Logs are written to a single file in the OS data dir:
    //   Linux    ~/.local/share/jerseylab/jerseylab.log
    //   macOS    ~/Library/Application Support/jerseylab/jerseylab.log
    //   Windows  %LOCALAPPDATA%\jerseylab\jerseylab.log
    //
    // Log level is controlled by the RUST_LOG environment variable;
    // defaults to INFO when the variable is absent.
    let log_dir = dirs::data_local_dir()
        .unwrap_or_default()
        .join("jerseylab");

    // tracing_appender::rolling::never panics if it cannot open the log file,
    // so the directory tree is created first.
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "jerseylab.log");
    let (non_blocking, _tracing_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .init();

    tracing::info!("JerseyLab starting");

    // ── Configuration ────────────────────────────────────────────────────────
    let config_path = config::default_path();
    let config = config::load(&config_path)?;
    tracing::info!(path = %config_path.display(), "configuration loaded");

    let store_dir = config
        .storage
        .dir
        .clone()
        .unwrap_or_else(FileStore::default_dir);
    let collaborators = Collaborators {
        store: Arc::new(FileStore::new(store_dir)),
        ..Collaborators::default()
    };

    // ── Workbench ────────────────────────────────────────────────────────────
    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(async {
        let bench = Workbench::mount(collaborators, config).await;
        bench.summary()
    })?;

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| AppError::Io(format!("cannot serialize summary: {e}")))?;
    println!("{json}");
    Ok(())
}
