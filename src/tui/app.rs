//! Application state for the TUI.

use tracing::debug;

use crate::models::Symbol;
use crate::store::{DashboardView, Store, Transition};

/// Central application state container.
pub struct App {
    /// The one subscription state store.
    pub store: Store,
    /// Flag to signal application should quit.
    pub should_quit: bool,
    /// Store version that was last drawn.
    rendered_version: Option<u64>,
}

impl App {
    /// Creates an App with `selected` as the initial pair.
    pub fn new(selected: Symbol) -> Self {
        Self {
            store: Store::new(selected),
            should_quit: false,
            rendered_version: None,
        }
    }

    /// The currently selected pair.
    pub fn selected(&self) -> Symbol {
        self.store.state().selected()
    }

    /// Applies a transition reported by the connection manager.
    ///
    /// A price for a pair other than the selected one can only come from a
    /// frame decoded before the manager saw the switch, so it is dropped.
    pub fn apply(&mut self, transition: Transition) {
        if let Transition::UpdatePrice { symbol, .. } = &transition {
            if *symbol != self.selected() {
                debug!(%symbol, selected = %self.selected(), "Dropping price for deselected symbol");
                return;
            }
        }
        self.store.dispatch(transition);
    }

    /// Records a user's pair choice.
    ///
    /// Returns the action to forward to the connection manager, or `None`
    /// if `symbol` is already selected.
    pub fn select(&mut self, symbol: Symbol) -> Option<Action> {
        if symbol == self.selected() {
            return None;
        }
        self.store.dispatch(Transition::SelectSymbol(symbol));
        Some(Action::SelectSymbol(symbol))
    }

    /// Snapshot of what the dashboard shows.
    pub fn view(&self) -> DashboardView {
        self.store.view()
    }

    /// Returns `true` if the store changed since the last draw.
    pub fn needs_redraw(&self) -> bool {
        self.rendered_version != Some(self.store.version())
    }

    /// Marks the current store version as drawn.
    pub fn mark_rendered(&mut self) {
        self.rendered_version = Some(self.store.version());
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Symbol::default())
    }
}

/// Requests the dashboard hands to the connection manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Switch the stream to a different pair.
    SelectSymbol(Symbol),
    /// Close and reopen the stream.
    Reconnect,
}

impl From<Action> for crate::websocket::ConnectionCommand {
    fn from(action: Action) -> Self {
        match action {
            Action::SelectSymbol(symbol) => Self::SelectSymbol(symbol),
            Action::Reconnect => Self::Reconnect,
        }
    }
}
