// Lineup entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the formation store
// 4. Build AppState and restore the saved formation
// 5. Create mpsc channels
// 6. Spawn app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::path::Path;

use lineup_core::config;
use lineup_core::db::SqliteStore;
use lineup_tui::app;
use lineup_tui::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Lineup starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} players, pitch {}x{}",
        config.roster.len(),
        config.geometry.pitch.width,
        config.geometry.pitch.height
    );

    if config.db_path != ":memory:" {
        if let Some(parent) = Path::new(&config.db_path).parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create data directory {}", parent.display())
            })?;
        }
    }
    let store = SqliteStore::open(&config.db_path).context("failed to open database")?;
    info!("Database opened at {}", config.db_path);

    let geometry = config.geometry;
    let mut app_state = app::AppState::new(config, Box::new(store));

    match app::restore_from_store(&mut app_state) {
        Ok(true) => info!("Formation restored from previous session"),
        Ok(false) => info!("Starting with everyone on the bench"),
        Err(e) => {
            error!("Restoring formation failed: {}", e);
            return Err(e.context("failed to restore formation"));
        }
    }

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // Blocks until the user quits.
    if let Err(e) = tui::run(ui_rx, cmd_tx, geometry).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Lineup shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("lineup.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lineup_core=info,lineup_tui=info,lineup=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
