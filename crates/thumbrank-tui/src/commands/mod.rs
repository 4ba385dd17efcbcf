// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, Effect},
    theme::Theme,
};
use thumbrank_core::SortOption;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the popup if one is open, otherwise the app
    Quit,
    // Toggle the help popup
    Help,
    // Re-rank the board
    Sort(SortOption),
    // Change theme
    Theme(String),
    // Commentary for the selected row
    Analyze,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "analyze" | "analyse" => Ok(Command::Analyze),
            "sort" => {
                if rest.is_empty() {
                    Err("usage: sort <ctr-desc|ctr-asc|rating>".to_string())
                } else {
                    rest.parse::<SortOption>().map(Command::Sort)
                }
            }
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Option<Effect> {
    match cmd {
        Command::Quit => {
            if s.analysis.is_some() {
                s.close_analysis();
            } else {
                s.quit = true;
            }
            None
        }
        Command::Help => {
            s.show_help = !s.show_help;
            None
        }
        Command::Sort(option) => {
            s.set_sort(option);
            None
        }
        Command::Theme(name) => {
            s.theme = Theme::load(&name);
            None
        }
        Command::Analyze => s.request_analysis(),
    }
}
