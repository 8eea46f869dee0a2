//! Board document on disk
//!
//! Three files sit side by side:
//!
//! - `<name>.json`: the board
//! - `<name>.backup.json`: a copy refreshed at most once per backup interval
//! - `<name>.last-backup`: unix milliseconds of the last backup
//!
//! Loading prefers the main file and falls back to the backup when the main
//! file is missing or not a valid board document. A board file that exists but
//! cannot be decoded, with no usable backup beside it, is an error: the store
//! refuses to open rather than start empty and overwrite it.

use crate::{BoardState, StoreError};
use aura_domain::traits::ProjectRepository;
use aura_domain::{Project, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Board document path
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Minimum time between two backups (in seconds)
    /// Default: 300 (5 minutes)
    #[serde(default = "default_backup_interval")]
    pub backup_interval_secs: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("aura-board.json")
}

fn default_backup_interval() -> u64 {
    300
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            backup_interval_secs: default_backup_interval(),
        }
    }
}

impl StoreConfig {
    /// Default settings for the board at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Get backup interval as Duration
    pub fn backup_interval(&self) -> Duration {
        Duration::from_secs(self.backup_interval_secs)
    }
}

/// Where the loaded board came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The main board file
    Main,
    /// The backup, after the main file was missing or invalid
    Backup,
    /// Nothing usable on disk; started empty
    Empty,
}

/// Repository backed by the board document on disk
///
/// The whole board is held in memory. Every `update_project` replaces the
/// project in memory first and then rewrites the file, so a failed save
/// never leaves the in-memory board behind the caller's view.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    backup_path: PathBuf,
    stamp_path: PathBuf,
    backup_interval: Duration,
    state: BoardState,
    source: LoadSource,
}

impl JsonFileStore {
    /// Open the board described by `config`, recovering from the backup if needed
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let path = config.path.clone();
        let mut store = Self {
            backup_path: sibling(&path, "backup.json"),
            stamp_path: sibling(&path, "last-backup"),
            path,
            backup_interval: config.backup_interval(),
            state: BoardState::default(),
            source: LoadSource::Empty,
        };

        let main = match read_board(&store.path) {
            Ok(Some(state)) => {
                tracing::debug!("Loaded board from {}", store.path.display());
                store.state = state;
                store.source = LoadSource::Main;
                return Ok(store);
            }
            other => other,
        };

        match read_board(&store.backup_path) {
            Ok(Some(state)) => {
                tracing::warn!(
                    "Board at {} unusable, recovered from backup {}",
                    store.path.display(),
                    store.backup_path.display()
                );
                store.state = state;
                store.source = LoadSource::Backup;
                store.save()?;
            }
            Ok(None) => {
                main?;
                tracing::info!("No board found at {}, starting empty", store.path.display());
            }
            Err(backup_err) => {
                main?;
                return Err(backup_err);
            }
        }

        Ok(store)
    }

    /// Board file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup file path
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Where the board was loaded from
    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// Borrow the in-memory board
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Append a new project and save
    pub fn insert_project(&mut self, project: Project) -> Result<(), StoreError> {
        if self.state.project(&project.id).is_some() {
            return Err(StoreError::InvalidDocument(format!("duplicate project id {}", project.id)));
        }
        self.state.projects.push(project);
        self.save()
    }

    /// Write the board, refreshing the backup when it is due
    pub fn save(&self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.state)?;
        write_atomic(&self.path, &contents)?;
        tracing::debug!("Saved board to {}", self.path.display());

        if self.backup_due() {
            self.create_backup(&contents)?;
        }
        Ok(())
    }

    fn backup_due(&self) -> bool {
        let last = fs::read_to_string(&self.stamp_path)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let elapsed = now_millis().saturating_sub(last);
        u128::from(elapsed) >= self.backup_interval.as_millis()
    }

    fn create_backup(&self, contents: &str) -> Result<(), StoreError> {
        write_atomic(&self.backup_path, contents)?;
        write_atomic(&self.stamp_path, &now_millis().to_string())?;
        tracing::info!("Backup written to {}", self.backup_path.display());
        Ok(())
    }
}

impl ProjectRepository for JsonFileStore {
    type Error = StoreError;

    fn list_projects(&self) -> Result<Vec<Project>, Self::Error> {
        Ok(self.state.projects.clone())
    }

    fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, Self::Error> {
        Ok(self.state.project(id).cloned())
    }

    fn update_project(&mut self, project: Project) -> Result<(), Self::Error> {
        self.state.replace_project(project)?;
        self.save()
    }
}

/// Read and validate a board document; `Ok(None)` when the file is missing
fn read_board(path: &Path) -> Result<Option<BoardState>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return Err(unreadable(path, e));
        }
    };

    serde_json::from_str::<Value>(&raw)
        .map_err(StoreError::from)
        .and_then(BoardState::from_document)
        .map(Some)
        .map_err(|e| {
            tracing::warn!("Cannot decode {}: {}", path.display(), e);
            unreadable(path, e)
        })
}

fn unreadable(path: &Path, reason: impl std::fmt::Display) -> StoreError {
    StoreError::Unreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Write through a temporary sibling file and rename it into place
fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = sibling(path, "tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// `board.json` + `backup.json` -> `board.backup.json`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "board".to_string());
    path.with_file_name(format!("{}.{}", stem, suffix))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_paths() {
        let path = Path::new("/tmp/aura/board.json");
        assert_eq!(sibling(path, "backup.json"), PathBuf::from("/tmp/aura/board.backup.json"));
        assert_eq!(sibling(path, "last-backup"), PathBuf::from("/tmp/aura/board.last-backup"));
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.backup_interval(), Duration::from_secs(300));
        assert_eq!(config.path, PathBuf::from("aura-board.json"));
    }
}
