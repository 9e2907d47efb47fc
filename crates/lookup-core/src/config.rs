//! Configuration types for lookup.
//!
//! [`Config::load`] reads `~/.config/lookup/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies
//! `LOOKUP__SECTION__KEY` environment overrides. [`Config::defaults`] returns
//! the embedded defaults without touching the filesystem (useful in tests).

use crate::types::Parity;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[datasets]
base_url    = ""
credentials = "https://ntsoc.github.io/passwd/passwords.json"
roster      = "students.json"
schedule    = "course_schedule.json"

[search]
debounce_ms    = 300
min_live_chars = 2

[ui]
default_parity = "odd"
show_schedule  = true
theme          = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub datasets: DatasetsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[datasets]` section: where each dataset is fetched from.
///
/// Locations starting with `http://` or `https://` are fetched over HTTP.
/// Anything else is joined onto `base_url` when one is set, or read as a
/// local file path otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetsConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_credentials")]
    pub credentials: String,
    #[serde(default = "default_roster")]
    pub roster: String,
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

fn default_credentials() -> String { "https://ntsoc.github.io/passwd/passwords.json".to_string() }
fn default_roster() -> String { "students.json".to_string() }
fn default_schedule() -> String { "course_schedule.json".to_string() }

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            credentials: default_credentials(),
            roster: default_roster(),
            schedule: default_schedule(),
        }
    }
}

impl DatasetsConfig {
    /// `base_url`, or `None` when unset.
    pub fn base(&self) -> Option<&str> {
        Some(self.base_url.trim()).filter(|s| !s.is_empty())
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed query runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Typed (not submitted) queries shorter than this do not search.
    #[serde(default = "default_min_live_chars")]
    pub min_live_chars: usize,
}

fn default_debounce_ms() -> u64 { 300 }
fn default_min_live_chars() -> usize { 2 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_live_chars: default_min_live_chars(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_parity")]
    pub default_parity: String,
    #[serde(default = "default_show_schedule")]
    pub show_schedule: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_parity() -> String { "odd".to_string() }
fn default_show_schedule() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_parity: default_parity(),
            show_schedule: default_show_schedule(),
            theme: default_theme(),
        }
    }
}

impl UiConfig {
    /// Parsed `default_parity`; unrecognised values fall back to odd weeks.
    pub fn parity(&self) -> Parity {
        Parity::parse(&self.default_parity).unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/lookup/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path, layered on top of the built-in defaults.
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("LOOKUP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
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
        .join("lookup")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
