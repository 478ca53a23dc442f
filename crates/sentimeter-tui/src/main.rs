// Sentimeter entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the prediction client
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use sentimeter_client::HttpPredictionClient;
use sentimeter_core::config;
use sentimeter_tui::{app, tui};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Sentimeter starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: endpoint={}, max_chars={}, discard_stale_results={}",
        config.service.endpoint, config.form.max_chars, config.form.discard_stale_results
    );

    // 3. Build the prediction client
    let client = HttpPredictionClient::from_config(&config);

    // 4. Create mpsc channels
    let (prediction_tx, prediction_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(
        config.form.form_options(),
        Arc::new(client),
        prediction_tx,
    );

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, prediction_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop (blocks until the user quits)
    let render_interval = Duration::from_millis(config.ui.render_interval_ms);
    if let Err(e) = tui::run(ui_rx, cmd_tx, config.service.endpoint.clone(), render_interval).await
    {
        error!("TUI error: {:#}", e);
    }

    // 7. Cleanup: wait for the app task to finish (with timeout)
    if tokio::time::timeout(Duration::from_secs(5), app_handle)
        .await
        .is_err()
    {
        error!("Application loop did not stop within 5s");
    }

    info!("Sentimeter shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("sentimeter.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sentimeter=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
