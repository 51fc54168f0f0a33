//! Shared test utilities: a scripted connector and a store-side harness.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use tickerdash::config::FeedConfig;
use tickerdash::models::{ConnectionStatus, Symbol};
use tickerdash::store::{Store, SubscriptionState, Transition};
use tickerdash::tui::Message;
use tickerdash::websocket::{
    ConnectionCommand, ConnectionManager, Connector, FeedConnection, FeedEvent,
};
use tickerdash::{DashError, Result};

/// Base URL handed to managers under test.
pub const TEST_STREAM_URL: &str = "wss://stream.test.invalid/ws";

/// Upper bound for any single wait in a test.
const WAIT_LIMIT: Duration = Duration::from_secs(120);

/// Feed settings matching the production defaults.
pub fn feed_config() -> FeedConfig {
    FeedConfig {
        stream_url: TEST_STREAM_URL.to_string(),
        reconnect_attempts: 10,
        reconnect_interval: Duration::from_millis(3000),
    }
}

/// Builds a `<symbol>@ticker` frame with the given last price.
pub fn ticker_frame(symbol: &str, last_price: &str) -> String {
    serde_json::json!({
        "e": "24hrTicker",
        "E": 1_700_000_000_123_u64,
        "s": symbol,
        "p": "1250.00",
        "P": "2.5",
        "c": last_price,
        "h": "51000.00",
        "l": "48000.00",
        "v": "1234.567",
    })
    .to_string()
}

#[derive(Default)]
struct Script {
    outcomes: VecDeque<mpsc::UnboundedReceiver<FeedEvent>>,
    dialed: Vec<String>,
    closes: Vec<u16>,
    dial_delay: Duration,
}

/// [`Connector`] whose dials succeed only when a link has been queued.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    script: Arc<Mutex<Script>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one successful dial and returns the peer side of it.
    pub fn accept(&self) -> LinkHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        self.script.lock().unwrap().outcomes.push_back(rx);
        LinkHandle { tx: Some(tx) }
    }

    /// Makes every later dial take `delay` before it resolves.
    pub fn delay_dials(&self, delay: Duration) {
        self.script.lock().unwrap().dial_delay = delay;
    }

    /// Every URL that reached the endpoint, in order. A dial abandoned
    /// during its delay is not recorded.
    pub fn dialed(&self) -> Vec<String> {
        self.script.lock().unwrap().dialed.clone()
    }

    /// Every close code the manager sent, in order.
    pub fn closes(&self) -> Vec<u16> {
        self.script.lock().unwrap().closes.clone()
    }
}

impl Connector for ScriptedConnector {
    type Connection = ScriptedConnection;

    async fn connect(&self, url: &str) -> Result<ScriptedConnection> {
        let delay = self.script.lock().unwrap().dial_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut script = self.script.lock().unwrap();
        script.dialed.push(url.to_string());
        match script.outcomes.pop_front() {
            Some(rx) => Ok(ScriptedConnection {
                rx,
                script: Arc::clone(&self.script),
            }),
            None => Err(DashError::Io("connection refused".to_string())),
        }
    }
}

pub struct ScriptedConnection {
    rx: mpsc::UnboundedReceiver<FeedEvent>,
    script: Arc<Mutex<Script>>,
}

impl FeedConnection for ScriptedConnection {
    async fn next_event(&mut self) -> Option<FeedEvent> {
        self.rx.recv().await
    }

    async fn close(&mut self, code: u16) -> Result<()> {
        self.script.lock().unwrap().closes.push(code);
        Ok(())
    }
}

/// Server side of one scripted connection.
pub struct LinkHandle {
    tx: Option<mpsc::UnboundedSender<FeedEvent>>,
}

impl LinkHandle {
    pub fn text(&self, text: impl Into<String>) {
        self.send(FeedEvent::Text(text.into()));
    }

    pub fn send(&self, event: FeedEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    /// Ends the stream without a close frame.
    pub fn drop_link(&mut self) {
        self.tx = None;
    }
}

/// Runs a manager against a [`ScriptedConnector`] and applies everything
/// it reports to a local [`Store`].
pub struct Harness {
    pub connector: ScriptedConnector,
    pub store: Store,
    pub seen: Vec<Transition>,
    rx: mpsc::UnboundedReceiver<Message>,
    cmd_tx: Option<mpsc::UnboundedSender<ConnectionCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl Harness {
    pub fn start(connector: ScriptedConnector, config: &FeedConfig, symbol: Symbol) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let handle = ConnectionManager::new(connector.clone(), config, symbol, tx, cmd_rx).spawn();
        Self {
            connector,
            store: Store::new(symbol),
            seen: Vec::new(),
            rx,
            cmd_tx: Some(cmd_tx),
            handle: Some(handle),
        }
    }

    pub fn state(&self) -> &SubscriptionState {
        self.store.state()
    }

    /// Selects `symbol` the way the dashboard does: store first, then the
    /// manager.
    pub fn select(&mut self, symbol: Symbol) {
        self.store.dispatch(Transition::SelectSymbol(symbol));
        self.command(ConnectionCommand::SelectSymbol(symbol));
    }

    pub fn command(&self, cmd: ConnectionCommand) {
        if let Some(tx) = &self.cmd_tx {
            tx.send(cmd).expect("manager stopped");
        }
    }

    /// Drops the command channel and waits for the manager to finish.
    pub async fn detach(&mut self) {
        self.cmd_tx = None;
        if let Some(handle) = self.handle.take() {
            tokio::time::timeout(WAIT_LIMIT, handle)
                .await
                .expect("manager did not stop")
                .expect("manager panicked");
        }
        self.settle(Duration::ZERO).await;
    }

    fn apply(&mut self, message: Message) {
        if let Message::Transition(transition) = message {
            self.seen.push(transition.clone());
            self.store.dispatch(transition);
        }
    }

    /// Applies transitions until `done` holds for the state.
    pub async fn pump_until(&mut self, done: impl Fn(&SubscriptionState) -> bool) {
        let deadline = Instant::now() + WAIT_LIMIT;
        while !done(self.store.state()) {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(message)) => self.apply(message),
                Ok(None) => panic!("manager hung up before condition held"),
                Err(_) => panic!("condition not reached; seen {:?}", self.seen),
            }
        }
    }

    /// Applies everything reported within `window`.
    pub async fn settle(&mut self, window: Duration) {
        let deadline = Instant::now() + window;
        loop {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(message)) => self.apply(message),
                Ok(None) | Err(_) => break,
            }
        }
    }

    /// Connection statuses in the order they were reported.
    pub fn statuses(&self) -> Vec<ConnectionStatus> {
        self.seen
            .iter()
            .filter_map(|t| match t {
                Transition::SetConnectionStatus(status) => Some(*status),
                _ => None,
            })
            .collect()
    }

    /// Errors set so far, ignoring clears.
    pub fn errors(&self) -> Vec<String> {
        self.seen
            .iter()
            .filter_map(|t| match t {
                Transition::SetError(Some(e)) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }
}

pub fn is_open(state: &SubscriptionState) -> bool {
    state.status() == ConnectionStatus::Open
}

pub fn url_for(symbol: &str) -> String {
    format!("{TEST_STREAM_URL}/{symbol}@ticker")
}
