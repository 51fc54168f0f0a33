//! Ticker connection lifecycle management.
//!
//! [`ConnectionManager`] owns at most one live stream connection, always
//! aimed at the selected symbol. It mirrors every lifecycle step into the
//! store as a [`Transition`], decodes inbound frames, retries abnormal
//! closures a bounded number of times at a fixed interval, and tears the
//! connection down when the target changes, a manual reconnect is
//! requested, or the command channel closes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::codec::decode_frame;
use super::retry::RetryPolicy;
use super::{
    ABNORMAL_CLOSURE, Connector, FeedConnection, FeedEvent, NORMAL_CLOSURE, stream_url,
};
use crate::config::FeedConfig;
use crate::models::{ConnectionStatus, Symbol};
use crate::store::Transition;
use crate::tui::Message;

/// Error shown when the transport reports a failure.
pub const TRANSPORT_ERROR: &str = "WebSocket connection error";

/// Error shown when a frame addressed to us cannot be decoded.
pub const DECODE_ERROR: &str = "Error parsing price data";

/// Upper bound on how long sending a close frame may take.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Commands sent from the dashboard to the connection manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionCommand {
    /// The user picked a symbol.
    SelectSymbol(Symbol),
    /// The user asked to retry the connection.
    Reconnect,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    /// We closed it, or abandoned the dial, and the current target should be
    /// dialed right away.
    Redial,
    /// The peer closed with the normal code.
    PeerClosed,
    /// The connection closed abnormally or never opened.
    Abnormal { code: u16 },
    /// The command channel or the store went away.
    Detached,
}

/// What a command asks of the current connection.
enum CommandEffect {
    Ignored,
    Redial,
    Detach,
}

/// Whichever of two awaited sources fired first.
enum Wake<T> {
    Ready(T),
    Command(Option<ConnectionCommand>),
}

/// Drives the single ticker connection and reports to the store.
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    base_url: String,
    target: Symbol,
    retry: RetryPolicy,
    phase: ConnectionStatus,
    last_frame_at: Option<Instant>,
    tx: mpsc::UnboundedSender<Message>,
    cmd_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
}

impl<C: Connector> ConnectionManager<C> {
    /// Creates a manager that will subscribe to `target` once run.
    #[must_use]
    pub fn new(
        connector: C,
        config: &FeedConfig,
        target: Symbol,
        tx: mpsc::UnboundedSender<Message>,
        cmd_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
    ) -> Self {
        Self {
            connector: Arc::new(connector),
            base_url: config.stream_url.clone(),
            target,
            retry: RetryPolicy::from_feed_config(config),
            phase: ConnectionStatus::Uninstantiated,
            last_frame_at: None,
            tx,
            cmd_rx,
        }
    }

    /// Spawns [`run`](Self::run) on the tokio runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until the command channel closes or the store goes away.
    pub async fn run(mut self) {
        info!(symbol = %self.target, "Connection manager started");

        loop {
            let keep_going = match self.session().await {
                SessionEnd::Redial => true,
                SessionEnd::PeerClosed => self.wait_for_command().await,
                SessionEnd::Abnormal { code } => self.back_off(code).await,
                SessionEnd::Detached => false,
            };
            if !keep_going {
                break;
            }
        }

        self.set_phase(ConnectionStatus::Closed);
        info!(symbol = %self.target, "Connection manager stopped");
    }

    /// Dials the current target and reads from it until it ends.
    async fn session(&mut self) -> SessionEnd {
        self.set_phase(ConnectionStatus::Connecting);

        let url = stream_url(&self.base_url, self.target);
        info!(
            %url,
            symbol = %self.target,
            attempt = self.retry.attempts(),
            "Connecting to ticker stream"
        );

        let connector = Arc::clone(&self.connector);
        let dial = connector.connect(&url);
        tokio::pin!(dial);

        let dialed = loop {
            let wake = tokio::select! {
                result = &mut dial => Wake::Ready(result),
                cmd = self.cmd_rx.recv() => Wake::Command(cmd),
            };
            match wake {
                Wake::Ready(result) => break result,
                Wake::Command(cmd) => match self.apply_command(cmd) {
                    CommandEffect::Ignored => {}
                    CommandEffect::Redial => {
                        debug!(%url, "Abandoning in-flight connect");
                        self.abandon();
                        return SessionEnd::Redial;
                    }
                    CommandEffect::Detach => {
                        self.abandon();
                        return SessionEnd::Detached;
                    }
                },
            }
        };

        let mut conn = match dialed {
            Ok(conn) => conn,
            Err(e) => {
                error!(error = %e, %url, "Failed to connect to ticker stream");
                self.emit(Transition::SetError(Some(TRANSPORT_ERROR.to_string())));
                return self.on_peer_close(ABNORMAL_CLOSURE);
            }
        };

        self.on_open();

        loop {
            let wake = tokio::select! {
                event = conn.next_event() => Wake::Ready(event),
                cmd = self.cmd_rx.recv() => Wake::Command(cmd),
            };
            match wake {
                Wake::Ready(Some(FeedEvent::Text(text))) => {
                    if !self.on_frame(&text) {
                        return self.teardown(&mut conn, SessionEnd::Detached).await;
                    }
                }
                Wake::Ready(Some(FeedEvent::Error(e))) => {
                    warn!(error = %e, symbol = %self.target, "WebSocket transport error");
                    self.emit(Transition::SetError(Some(TRANSPORT_ERROR.to_string())));
                }
                Wake::Ready(Some(FeedEvent::Closed { code })) => return self.on_peer_close(code),
                Wake::Ready(None) => return self.on_peer_close(ABNORMAL_CLOSURE),
                Wake::Command(cmd) => match self.apply_command(cmd) {
                    CommandEffect::Ignored => {}
                    CommandEffect::Redial => {
                        return self.teardown(&mut conn, SessionEnd::Redial).await;
                    }
                    CommandEffect::Detach => {
                        return self.teardown(&mut conn, SessionEnd::Detached).await;
                    }
                },
            }
        }
    }

    fn on_open(&mut self) {
        info!(symbol = %self.target, "Ticker stream open");
        self.retry.reset();
        self.set_phase(ConnectionStatus::Open);
        self.emit(Transition::SetLoading(false));
    }

    /// Decodes a frame against the current target and reports the result.
    /// Returns `false` once the store is gone.
    fn on_frame(&mut self, text: &str) -> bool {
        match decode_frame(text, self.target) {
            Ok(record) => {
                self.last_frame_at = Some(Instant::now());
                self.set_phase(ConnectionStatus::Open);
                self.emit(Transition::UpdatePrice {
                    symbol: self.target,
                    record,
                })
            }
            Err(e) if e.is_foreign() => {
                debug!(error = %e, symbol = %self.target, "Ignoring frame");
                true
            }
            Err(e) => {
                error!(error = %e, symbol = %self.target, "Error parsing ticker frame");
                self.emit(Transition::SetError(Some(DECODE_ERROR.to_string())))
            }
        }
    }

    /// Classifies a closure the peer or the transport initiated.
    fn on_peer_close(&mut self, code: u16) -> SessionEnd {
        let idle_ms = self
            .last_frame_at
            .map(|at| u64::try_from(at.elapsed().as_millis()).unwrap_or(u64::MAX));
        self.set_phase(ConnectionStatus::Closed);

        if code == NORMAL_CLOSURE {
            info!(code, symbol = %self.target, "Ticker stream closed normally");
            SessionEnd::PeerClosed
        } else {
            warn!(code, ?idle_ms, symbol = %self.target, "Ticker stream closed abnormally");
            SessionEnd::Abnormal { code }
        }
    }

    /// Closes the connection on our own initiative.
    async fn teardown(&mut self, conn: &mut C::Connection, end: SessionEnd) -> SessionEnd {
        self.set_phase(ConnectionStatus::Closing);

        match tokio::time::timeout(CLOSE_TIMEOUT, conn.close(NORMAL_CLOSURE)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to send close frame"),
            Err(_) => warn!("Timed out sending close frame"),
        }

        self.set_phase(ConnectionStatus::Closed);
        end
    }

    /// Reports a requested closure when there is no live connection to
    /// close, such as during a dial or a retry wait.
    fn abandon(&mut self) {
        self.set_phase(ConnectionStatus::Closing);
        self.set_phase(ConnectionStatus::Closed);
    }

    /// Waits out the retry interval after an abnormal closure. Returns
    /// `false` when the manager should stop.
    async fn back_off(&mut self, code: u16) -> bool {
        self.set_phase(ConnectionStatus::Closed);

        let Some(delay) = self.retry.next_delay() else {
            let attempts = self.retry.max_attempts();
            error!(
                code,
                attempts,
                symbol = %self.target,
                "Reconnect attempts exhausted"
            );
            self.emit(Transition::SetError(Some(format!(
                "Connection lost after {attempts} reconnect attempts"
            ))));
            return self.wait_for_command().await;
        };

        info!(
            code,
            attempt = self.retry.attempts(),
            max_attempts = self.retry.max_attempts(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Scheduling reconnect"
        );
        self.set_phase(ConnectionStatus::Connecting);

        let timer = tokio::time::sleep(delay);
        tokio::pin!(timer);

        loop {
            let wake = tokio::select! {
                () = &mut timer => Wake::Ready(()),
                cmd = self.cmd_rx.recv() => Wake::Command(cmd),
            };
            match wake {
                Wake::Ready(()) => return true,
                Wake::Command(cmd) => match self.apply_command(cmd) {
                    CommandEffect::Ignored => {}
                    CommandEffect::Redial => {
                        debug!("Pending reconnect cancelled");
                        self.abandon();
                        return true;
                    }
                    CommandEffect::Detach => {
                        self.abandon();
                        return false;
                    }
                },
            }
        }
    }

    /// Sits in `Closed` until a command asks for a new connection.
    async fn wait_for_command(&mut self) -> bool {
        self.set_phase(ConnectionStatus::Closed);

        loop {
            let cmd = self.cmd_rx.recv().await;
            match self.apply_command(cmd) {
                CommandEffect::Ignored => {}
                CommandEffect::Redial => return true,
                CommandEffect::Detach => return false,
            }
        }
    }

    fn apply_command(&mut self, cmd: Option<ConnectionCommand>) -> CommandEffect {
        match cmd {
            None => {
                info!(symbol = %self.target, "Command channel closed, detaching");
                CommandEffect::Detach
            }
            Some(ConnectionCommand::SelectSymbol(symbol)) if symbol == self.target => {
                debug!(%symbol, "Symbol already selected");
                CommandEffect::Ignored
            }
            Some(ConnectionCommand::SelectSymbol(symbol)) => {
                info!(from = %self.target, to = %symbol, "Symbol changed");
                self.target = symbol;
                self.retry.reset();
                self.last_frame_at = None;
                CommandEffect::Redial
            }
            Some(ConnectionCommand::Reconnect) => {
                info!(symbol = %self.target, "Manual reconnect requested");
                self.retry.reset();
                CommandEffect::Redial
            }
        }
    }

    fn set_phase(&mut self, status: ConnectionStatus) {
        if self.phase == status {
            return;
        }
        debug!(
            from = self.phase.label(),
            to = status.label(),
            "Connection status changed"
        );
        self.phase = status;

        if status == ConnectionStatus::Connecting {
            self.emit(Transition::SetLoading(true));
        }
        self.emit(Transition::SetConnectionStatus(status));
    }

    /// Sends a transition to the store. Returns `false` if it is gone.
    fn emit(&self, transition: Transition) -> bool {
        if self.tx.send(Message::Transition(transition)).is_err() {
            debug!("Store receiver dropped");
            return false;
        }
        true
    }
}
