//! Configuration types for folio.
//!
//! [`Config::load`] reads `~/.config/folio/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file layered on the same defaults. [`Config::defaults`] returns
//! the defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
created_message = "Excerpt successfully created"
updated_message = "Excerpt successfully updated"
deleted_message = "Excerpt successfully deleted"

[source]
latency_ms = 0
seed       = ""

[log]
debug_file = "/tmp/folio-debug.log"
filter     = "debug"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/folio/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// `[store]` section: confirmation messages shown after a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_created_message")]
    pub created_message: String,
    #[serde(default = "default_updated_message")]
    pub updated_message: String,
    #[serde(default = "default_deleted_message")]
    pub deleted_message: String,
}

fn default_created_message() -> String { "Excerpt successfully created".to_string() }
fn default_updated_message() -> String { "Excerpt successfully updated".to_string() }
fn default_deleted_message() -> String { "Excerpt successfully deleted".to_string() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            created_message: default_created_message(),
            updated_message: default_updated_message(),
            deleted_message: default_deleted_message(),
        }
    }
}

/// `[source]` section: the in-memory source's simulated latency and seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub latency_ms: u64,
    /// Path to a JSON array of excerpts. Empty means start with no records.
    #[serde(default)]
    pub seed: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { latency_ms: 0, seed: String::new() }
    }
}

impl SourceConfig {
    pub fn latency(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.latency_ms)
    }

    pub fn seed_path(&self) -> Option<PathBuf> {
        let seed = self.seed.trim();
        (!seed.is_empty()).then(|| PathBuf::from(seed))
    }
}

/// `[log]` section: where `--debug` writes and at what level.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_debug_file")]
    pub debug_file: String,
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_debug_file() -> String { "/tmp/folio-debug.log".to_string() }
fn default_filter() -> String { "debug".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self { debug_file: default_debug_file(), filter: default_filter() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/folio/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
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

    /// Load an explicit file layered on top of the built-in defaults. The
    /// file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
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
        .join("folio")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
