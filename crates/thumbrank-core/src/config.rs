//! Configuration types for thumbrank.
//!
//! [`Config::load`] reads `~/.config/thumbrank/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::SortOption;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[sheet]
csv_url      = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT_4Ea2O4g7egH7hlu4LpUclAAS1BGC4_GTfhZfJub7FE9Xhzg4B0TCsvfP_P_xuDOgr9zpfF9TNmDu/pub?output=csv"
timeout_secs = 15

[analysis]
endpoint          = "https://generativelanguage.googleapis.com/v1beta"
model             = "gemini-2.5-flash"
api_key_env       = "API_KEY"
timeout_secs      = 60
low_ctr_threshold = 5.0

[ui]
default_sort = "ctr-desc"
theme        = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/thumbrank/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[sheet]` section: where the published CSV lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    #[serde(default = "default_csv_url")]
    pub csv_url: String,
    #[serde(default = "default_sheet_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_csv_url() -> String {
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vT_4Ea2O4g7egH7hlu4LpUclAAS1BGC4_GTfhZfJub7FE9Xhzg4B0TCsvfP_P_xuDOgr9zpfF9TNmDu/pub?output=csv".to_string()
}
fn default_sheet_timeout_secs() -> u64 { 15 }

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            csv_url: default_csv_url(),
            timeout_secs: default_sheet_timeout_secs(),
        }
    }
}

/// `[analysis]` section: the commentary model.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_analysis_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_low_ctr_threshold")]
    pub low_ctr_threshold: f64,
}

fn default_endpoint() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_model() -> String { "gemini-2.5-flash".to_string() }
fn default_api_key_env() -> String { "API_KEY".to_string() }
fn default_analysis_timeout_secs() -> u64 { 60 }
fn default_low_ctr_threshold() -> f64 { crate::prompt::DEFAULT_LOW_CTR_THRESHOLD }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_analysis_timeout_secs(),
            low_ctr_threshold: default_low_ctr_threshold(),
        }
    }
}

impl AnalysisConfig {
    /// API key from the configured environment variable.
    ///
    /// Unset, blank and the literal `undefined` (what some hosting setups
    /// inject for a missing variable) all count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != "undefined")
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_sort() -> String { "ctr-desc".to_string() }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            theme: default_theme(),
        }
    }
}

impl UiConfig {
    /// Parsed `default_sort`, falling back to CTR high → low when invalid.
    pub fn sort_option(&self) -> SortOption {
        self.default_sort.parse().unwrap_or_else(|err: String| {
            tracing::warn!(%err, "invalid ui.default_sort; using ctr-desc");
            SortOption::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/thumbrank/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer an explicit config file over the built-in defaults. The file is
    /// required to exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("thumbrank")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
