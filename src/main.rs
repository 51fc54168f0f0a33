use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tickerdash::DashError;
use tickerdash::config::fetch_config;
use tickerdash::tls::build_tls_config;
use tickerdash::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use tickerdash::tui::{App, Event, Message, Tui, render, restore_terminal, setup_terminal};
use tickerdash::websocket::connection::{ConnectionCommand, ConnectionManager};
use tickerdash::websocket::WsConnector;

/// Redraw period so the "last updated" age keeps moving.
const TICK_INTERVAL_MS: u64 = 250;

/// How long the connection manager gets to close its socket on exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> Result<(), DashError> {
    let app_config = fetch_config()?;

    // The terminal belongs to the dashboard, so logs go to a file.
    init_tracing(&app_config.log_file)?;

    let tls_config = Arc::new(build_tls_config()?);
    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ConnectionCommand>();

    let manager = ConnectionManager::new(
        WsConnector::new(tls_config),
        &app_config.feed,
        app_config.symbol,
        tx.clone(),
        cmd_rx,
    );
    let manager_handle = manager.spawn();

    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx, TICK_INTERVAL_MS);

    let mut app = App::new(app_config.symbol);
    let result = run(&mut terminal, &mut app, &mut rx, &cmd_tx).await;

    restore_terminal(&mut terminal)?;

    // Closing the command channel detaches the manager.
    drop(cmd_tx);
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, manager_handle)
        .await
        .is_err()
    {
        warn!("Connection manager did not stop in time");
    }
    info!("Dashboard exited");

    result
}

fn init_tracing(log_file: &Path) -> Result<(), DashError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| DashError::Io(format!("failed to open {}: {e}", log_file.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    cmd_tx: &mpsc::UnboundedSender<ConnectionCommand>,
) -> Result<(), DashError> {
    draw(terminal, app)?;

    while let Some(message) = rx.recv().await {
        let periodic = matches!(message, Message::Input(Event::Tick | Event::Resize(..)));

        if let Some(action) = update(app, message) {
            if cmd_tx.send(action.into()).is_err() {
                warn!(?action, "Connection manager is gone");
            }
        }

        if app.should_quit {
            break;
        }
        if periodic || app.needs_redraw() {
            draw(terminal, app)?;
        }
    }

    Ok(())
}

fn draw(terminal: &mut Tui, app: &mut App) -> Result<(), DashError> {
    terminal
        .draw(|frame| render(frame, app))
        .map_err(|e| DashError::Io(format!("failed to draw: {e}")))?;
    app.mark_rendered();
    Ok(())
}
