//! Colour theme for the thumbrank TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load`] at startup with the configured name and pass the
//! result through the application as a shared reference.
//!
//! # Rating tiers
//!
//! Grades are matched case-insensitively by the letters they contain, checked
//! in order: any `S` is top, then `A` high, then `B` mid, then `C`–`F` low.
//! Anything else (including the `-` sentinel) is unrated.
//!
//! # CTR tiers
//!
//! Below the configured low-CTR threshold is low, at or above
//! [`STRONG_CTR`] is high, and everything between is mid.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// CTR (percent) from which a thumbnail counts as strong.
pub const STRONG_CTR: f64 = 8.0;

// ---------------------------------------------------------------------------
// Raw (serde) types mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawRatings {
    top: RawStyle,
    high: RawStyle,
    mid: RawStyle,
    low: RawStyle,
    unrated: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCtr {
    high: RawStyle,
    mid: RawStyle,
    low: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBoard {
    cursor: RawStyle,
    rank: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBanner {
    warning: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    pending: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    ratings: RawRatings,
    ctr: RawCtr,
    borders: RawBorders,
    board: RawBoard,
    banner: RawBanner,
    analysis: RawAnalysis,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values, so nothing allocates at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub rating_top: Style,
    pub rating_high: Style,
    pub rating_mid: Style,
    pub rating_low: Style,
    pub rating_unrated: Style,

    /// CTR at or above [`STRONG_CTR`].
    pub ctr_high: Style,
    /// CTR between the low-CTR threshold and [`STRONG_CTR`].
    pub ctr_mid: Style,
    /// CTR below the low-CTR threshold.
    pub ctr_low: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    /// Highlight for the selected board row.
    pub cursor: Style,
    pub rank: Style,

    /// Fallback-data banner.
    pub warning: Style,

    pub analysis_pending: Style,
    pub analysis_error: Style,
}

impl Theme {
    /// Theme by config name; unknown names get the default theme.
    pub fn load(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            _ => Self::load_default(),
        }
    }

    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            rating_top: raw.ratings.top.into_style(),
            rating_high: raw.ratings.high.into_style(),
            rating_mid: raw.ratings.mid.into_style(),
            rating_low: raw.ratings.low.into_style(),
            rating_unrated: raw.ratings.unrated.into_style(),
            ctr_high: raw.ctr.high.into_style(),
            ctr_mid: raw.ctr.mid.into_style(),
            ctr_low: raw.ctr.low.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            cursor: raw.board.cursor.into_style(),
            rank: raw.board.rank.into_style(),
            warning: raw.banner.warning.into_style(),
            analysis_pending: raw.analysis.pending.into_style(),
            analysis_error: raw.analysis.error.into_style(),
        })
    }

    /// Style for a free-form rating string.
    pub fn rating_style(&self, rating: &str) -> Style {
        let grade = rating.trim().to_uppercase();
        if grade.contains('S') {
            self.rating_top
        } else if grade.contains('A') {
            self.rating_high
        } else if grade.contains('B') {
            self.rating_mid
        } else if grade.contains(|c: char| ('C'..='F').contains(&c)) {
            self.rating_low
        } else {
            self.rating_unrated
        }
    }

    /// Style for a CTR value given the low-CTR threshold (both in percent).
    pub fn ctr_style(&self, ctr: f64, low_threshold: f64) -> Style {
        if ctr < low_threshold {
            self.ctr_low
        } else if ctr >= STRONG_CTR.max(low_threshold) {
            self.ctr_high
        } else {
            self.ctr_mid
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
