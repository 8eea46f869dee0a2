//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use aura_board::CanvasConfig;
use aura_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration, read from `~/.aura/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Canvas layout and rendering
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Board file and backups
    #[serde(default = "default_store")]
    pub store: StoreConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Canvas session history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file, history and the default board.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".aura"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path` (or the default path).
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Store settings with the board path overridden from the command line.
    pub fn store_config(&self, board: Option<PathBuf>) -> StoreConfig {
        let mut store = self.store.clone();
        if let Some(board) = board {
            store.path = board;
        }
        store
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            canvas: CanvasConfig::default(),
            store: default_store(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_store() -> StoreConfig {
    match Config::dir() {
        Ok(dir) => StoreConfig::new(dir.join("board.json")),
        Err(_) => StoreConfig::default(),
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.settings.history_size, 1000);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[settings]
format = "json"

[canvas]
snap_grid = 20.0
dedupe_reciprocal_edges = true

[store]
path = "/tmp/aura/board.json"
backup_interval_secs = 60
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.canvas.snap_grid, Some(20.0));
        assert!(config.canvas.dedupe_reciprocal_edges);
        assert_eq!(config.canvas.layout.column_spacing, 300.0);
        assert_eq!(config.store.backup_interval_secs, 60);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.settings.color = false;
        config.store = StoreConfig::new(dir.path().join("board.json"));
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert!(!loaded.settings.color);
        assert_eq!(loaded.store, config.store);
    }

    #[test]
    fn test_board_override() {
        let config = Config::default();
        let store = config.store_config(Some(PathBuf::from("/tmp/other.json")));
        assert_eq!(store.path, PathBuf::from("/tmp/other.json"));
        assert_eq!(store.backup_interval_secs, config.store.backup_interval_secs);
    }
}
