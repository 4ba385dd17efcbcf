//! thumbrank TUI: a ratatui dashboard over a loaded [`Dataset`].

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

use std::sync::Arc;

pub use app::App;
use thumbrank_core::config::Config;
use thumbrank_feeds::{Analyst, Dataset};

/// Open the dashboard and block until the user quits.
///
/// Commentary requests are spawned on `runtime`, which must outlive the call.
pub fn run(
    dataset: Dataset,
    config: Config,
    analyst: Arc<dyn Analyst>,
    runtime: tokio::runtime::Handle,
) -> anyhow::Result<()> {
    let theme = theme::Theme::load(&config.ui.theme);
    App::new(dataset, config, theme, analyst, runtime).run()
}
