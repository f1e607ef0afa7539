use std::{env, path::PathBuf};

/// Default SQLite database file.
pub const DEFAULT_SQLITE_PATH: &str = "starschema.db";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to SQLite database file (default: "starschema.db", `:memory:` allowed)
    pub sqlite_path: String,
    /// JSON source file; the built-in sample data is used when unset
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "starschema.db")
    /// - `STARSCHEMA_SOURCE` - JSON source file (default: built-in sample data)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
            source_path: env::var("STARSCHEMA_SOURCE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Replaces values given on the command line.
    pub fn with_overrides(mut self, sqlite_path: Option<String>, source_path: Option<PathBuf>) -> Self {
        if let Some(path) = sqlite_path {
            self.sqlite_path = path;
        }
        if source_path.is_some() {
            self.source_path = source_path;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
