//! Ratatui widgets for the thumbrank TUI.

pub mod analysis_popup;
pub mod banner;
pub mod board;
pub mod command_bar;
pub mod detail;
pub mod header_bar;
pub mod help;
