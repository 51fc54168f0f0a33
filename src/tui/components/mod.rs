//! Reusable dashboard widgets.

pub mod info_panel;
pub mod price_card;
pub mod status_bar;
pub mod tab_bar;
