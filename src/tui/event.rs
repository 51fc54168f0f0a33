//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tokio::sync::mpsc;

use super::app::{Action, App};
use crate::models::Symbol;
use crate::store::Transition;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// State transition from the connection manager.
    Transition(Transition),
}

/// How long one blocking poll waits for terminal input.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Spawns a task that forwards key presses and resizes to `tx`.
///
/// Stops once the receiver is dropped.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            let polled = tokio::task::spawn_blocking(|| -> Option<CrosstermEvent> {
                match event::poll(POLL_TIMEOUT) {
                    Ok(true) => event::read().ok(),
                    _ => None,
                }
            })
            .await;

            let forwarded = match polled {
                Ok(Some(CrosstermEvent::Key(key))) => Event::Key(key),
                Ok(Some(CrosstermEvent::Resize(width, height))) => Event::Resize(width, height),
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(Message::Input(forwarded)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that sends [`Event::Tick`] every `interval_ms`.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(Duration::from_millis(interval_ms));
        ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        while tx.send(Message::Input(Event::Tick)).is_ok() {
            ticks.tick().await;
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(Event::Key(key)) => handle_key(app, key),
        Message::Input(Event::Resize(..) | Event::Tick) => None,
        Message::Transition(transition) => {
            app.apply(transition);
            None
        }
    }
}

/// Maps a key press onto the app. Repeats and releases are ignored.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => quit(app),
        KeyCode::Char('q') | KeyCode::Esc => quit(app),

        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
            let next = app.selected().next();
            app.select(next)
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
            let previous = app.selected().previous();
            app.select(previous)
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            Symbol::from_index(index).and_then(|symbol| app.select(symbol))
        }

        KeyCode::Char('r') => Some(Action::Reconnect),
        _ => None,
    }
}

fn quit(app: &mut App) -> Option<Action> {
    app.should_quit = true;
    None
}
