//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Key handling is synchronous and lives in [`AppState::handle`]. Anything
//! that needs the network comes back out of it as an [`Effect`]; the [`App`]
//! spawns it on the tokio runtime and the result returns through an mpsc
//! channel that the loop drains every tick.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        analysis_popup::{AnalysisPopup, AnalysisStatus, AnalysisView},
        banner::FallbackBanner,
        board::{Board, BoardState},
        command_bar::{CommandBar, CommandBarState},
        detail::Detail,
        header_bar::HeaderBar,
        help::HelpPopup,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use thumbrank_core::{config::Config, sort_records, SortOption, ThumbnailRecord};
use thumbrank_feeds::{AnalysisError, Analyst, DataOrigin, Dataset};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Focus, effects, outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Board,
    /// Vim-style `:` command line is active.
    Command,
}

/// Work the state machine asks the shell to perform off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Analyze {
        request_id: u64,
        record: ThumbnailRecord,
    },
}

/// Result of one commentary request, tagged with its request id.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub request_id: u64,
    pub result: Result<String, AnalysisError>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// Records in source order; the board holds the sorted copy.
    pub records: Vec<ThumbnailRecord>,
    pub origin: DataOrigin,
    pub sort: SortOption,
    pub board: BoardState,
    pub focus: Focus,
    pub theme: Theme,
    pub config: Config,
    /// Label for the commentary popup title.
    pub provider: String,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub analysis: Option<AnalysisView>,
    next_request_id: u64,
    pub quit: bool,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Config, theme: Theme, provider: String) -> Self {
        let sort = config.ui.sort_option();
        let board = BoardState::new(sort_records(&dataset.records, sort));

        Self {
            records: dataset.records,
            origin: dataset.origin,
            sort,
            board,
            focus: Focus::Board,
            theme,
            config,
            provider,
            show_help: false,
            command_bar: CommandBarState::default(),
            analysis: None,
            next_request_id: 0,
            quit: false,
        }
    }

    /// Apply one event. Returns the effect to run, if the event asked for one.
    pub fn handle(&mut self, event: AppEvent) -> Option<Effect> {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return None;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            return self.handle_command_bar(event);
        }

        // Commentary popup: scroll or close.
        if self.analysis.is_some() {
            match event {
                AppEvent::Escape | AppEvent::Quit => self.close_analysis(),
                other => {
                    if let Some(view) = self.analysis.as_mut() {
                        view.handle(&other);
                    }
                }
            }
            return None;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
                None
            }
            AppEvent::Char(':') => {
                tracing::debug!("entering command mode");
                self.command_bar.clear();
                self.focus = Focus::Command;
                None
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
                None
            }
            AppEvent::CycleSort => {
                self.set_sort(self.sort.cycle());
                None
            }
            AppEvent::Analyze | AppEvent::Enter => self.request_analysis(),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) | AppEvent::Escape => None,

            other => {
                self.board.handle(&other);
                None
            }
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) -> Option<Effect> {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = Focus::Board;
                None
            }
            AppEvent::Quit => {
                self.quit = true;
                None
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.clone();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = Focus::Board;
                        execute_command(self, cmd)
                    }
                    Err(msg) if msg.is_empty() => {
                        // Empty input just closes the bar
                        self.command_bar.clear();
                        self.focus = Focus::Board;
                        None
                    }
                    Err(msg) => {
                        // Show the error; bar stays open
                        self.command_bar.error = Some(msg);
                        None
                    }
                }
            }
            other => {
                self.command_bar.handle(&other);
                None
            }
        }
    }

    /// Re-rank the board, keeping the selected record under the cursor.
    pub fn set_sort(&mut self, sort: SortOption) {
        tracing::debug!(from = %self.sort, to = %sort, "sort changed");
        self.sort = sort;
        self.board.set_rows(sort_records(&self.records, sort));
    }

    /// Open the commentary popup for the selected record.
    ///
    /// Returns `None` when nothing is selected or when a request for the same
    /// record is still pending.
    pub fn request_analysis(&mut self) -> Option<Effect> {
        let record = self.board.selected()?.clone();

        if let Some(view) = &self.analysis {
            if view.record_id == record.id && view.is_pending() {
                tracing::debug!(id = %record.id, "commentary already pending");
                return None;
            }
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        tracing::debug!(request_id, id = %record.id, "commentary requested");
        self.analysis = Some(AnalysisView::pending(
            request_id,
            record.id.clone(),
            record.title.clone(),
            self.provider.clone(),
        ));

        Some(Effect::Analyze { request_id, record })
    }

    /// Record a finished request. Outcomes for a closed or superseded popup
    /// are dropped.
    pub fn apply_outcome(&mut self, outcome: AnalysisOutcome) {
        let Some(view) = self
            .analysis
            .as_mut()
            .filter(|v| v.request_id == outcome.request_id)
        else {
            tracing::debug!(request_id = outcome.request_id, "dropping stale commentary");
            return;
        };

        view.status = match outcome.result {
            Ok(text) => AnalysisStatus::Done(text),
            Err(err) => {
                tracing::error!(request_id = outcome.request_id, %err, "commentary failed");
                AnalysisStatus::Failed(err.user_message())
            }
        };
    }

    pub fn close_analysis(&mut self) {
        tracing::debug!("commentary popup closed");
        self.analysis = None;
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    analyst: Arc<dyn Analyst>,
    runtime: tokio::runtime::Handle,
    outcome_tx: mpsc::UnboundedSender<AnalysisOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<AnalysisOutcome>,
}

impl App {
    pub fn new(
        dataset: Dataset,
        config: Config,
        theme: Theme,
        analyst: Arc<dyn Analyst>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let state = AppState::new(dataset, config, theme, analyst.provider());
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        App {
            state,
            analyst,
            runtime,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            while let Ok(outcome) = self.outcome_rx.try_recv() {
                self.state.apply_outcome(outcome);
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                // Use insert-mode mapping when the command bar is open
                let app_event = if self.state.focus == Focus::Command {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    if let Some(effect) = self.state.handle(ev) {
                        self.spawn(effect);
                    }
                }
            }
        }
        Ok(())
    }

    fn spawn(&self, effect: Effect) {
        match effect {
            Effect::Analyze { request_id, record } => {
                let analyst = Arc::clone(&self.analyst);
                let tx = self.outcome_tx.clone();
                self.runtime.spawn(async move {
                    let result = analyst.analyze(&record).await;
                    // The receiver only goes away when the app is shutting down.
                    let _ = tx.send(AnalysisOutcome { request_id, result });
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let fallback_reason = match &state.origin {
        DataOrigin::Fallback { reason } => Some(reason.as_str()),
        DataOrigin::Live { .. } => None,
    };

    // Vertical: 1-line header | optional 1-line banner | body | 1-line command row
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(u16::from(fallback_reason.is_some())),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Fill(1)])
        .split(vert[2]);

    let threshold = state.config.analysis.low_ctr_threshold;

    frame.render_widget(
        HeaderBar::new(state.board.rows.len(), state.sort, &state.origin, &state.theme),
        vert[0],
    );
    if let Some(reason) = fallback_reason {
        frame.render_widget(FallbackBanner::new(reason, &state.theme), vert[1]);
    }
    frame.render_widget(
        Board::new(
            &state.board,
            state.focus == Focus::Board && state.analysis.is_none(),
            threshold,
            &state.theme,
        ),
        horiz[0],
    );
    frame.render_widget(
        Detail::new(state.board.selected(), threshold, &state.theme),
        horiz[1],
    );

    if let Some(view) = &state.analysis {
        frame.render_widget(AnalysisPopup::new(view, &state.theme), area);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    if state.focus == Focus::Command {
        let cmd_area: Rect = vert[3];
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
