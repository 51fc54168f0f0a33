//! Terminal User Interface for the ticker dashboard.
//!
//! Provides a Ratatui-based TUI that renders the subscription state and
//! turns key presses into pair selections and reconnect requests.

pub mod app;
pub mod components;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::{Action, App};
pub use event::{Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
