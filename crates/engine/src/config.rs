// Configuration for a single activity run.
//
// Layers, later wins: built-in defaults, `~/.cadence/config.toml` (or an
// explicit `--config` file), command-line overrides.

use std::path::{Path, PathBuf};

use cadence_common::notes::default_notes;
use cadence_common::path::{validate_log_file_name, LogPathError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FILENAME: &str = "activity_log.txt";
pub const DEFAULT_PROBABILITY: f64 = 0.7;

/// Root directory for cadence state: `~/.cadence/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cadence"))
}

/// Path to the default config file: `~/.cadence/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("config.toml"))
}

// ── Config file ────────────────────────────────────────────────────

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Repository to append to and push from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<PathBuf>,
    /// Log file, relative to the repository root.
    pub filename: String,
    /// Chance in `[0, 1]` that a working-day run records activity.
    pub probability: f64,
    /// Append to the log but never commit or push.
    pub dry_run: bool,
    /// Phrases to pick the note from.
    pub notes: Vec<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            repo_path: None,
            filename: DEFAULT_FILENAME.into(),
            probability: DEFAULT_PROBABILITY,
            dry_run: false,
            notes: default_notes(),
        }
    }
}

impl ConfigFile {
    /// Load `explicit` if given (it must exist), otherwise the default
    /// path. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|error| ConfigError::Io { path: path.to_path_buf(), error })?;
        toml::from_str(&contents)
            .map_err(|error| ConfigError::Parse { path: path.to_path_buf(), error })
    }

    /// Save to a specific path (creates parent directories).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|error| ConfigError::Io { path: parent.to_path_buf(), error })?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)
            .map_err(|error| ConfigError::Io { path: path.to_path_buf(), error })
    }
}

// ── Overrides ──────────────────────────────────────────────────────

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub repo_path: Option<PathBuf>,
    pub filename: Option<String>,
    pub probability: Option<f64>,
    /// Only ever turns dry-run on.
    pub dry_run: bool,
}

// ── Resolved config ────────────────────────────────────────────────

/// Fully resolved configuration, built once at startup.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityConfig {
    pub repo_path: PathBuf,
    pub filename: String,
    pub probability: f64,
    pub dry_run: bool,
    pub notes: Vec<String>,
}

impl ActivityConfig {
    /// Merge overrides onto the file and validate the result.
    ///
    /// Repository existence is checked separately by
    /// [`ActivityConfig::ensure_repository`], at the start of a run.
    pub fn resolve(file: ConfigFile, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let repo_path =
            overrides.repo_path.or(file.repo_path).ok_or(ConfigError::MissingRepository)?;

        let config = Self {
            repo_path,
            filename: overrides.filename.unwrap_or(file.filename),
            probability: overrides.probability.unwrap_or(file.probability),
            dry_run: overrides.dry_run || file.dry_run,
            notes: file.notes,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.probability));
        }
        if self.notes.is_empty() {
            return Err(ConfigError::NoNotes);
        }
        if let Some(index) = self.notes.iter().position(|note| note.trim().is_empty()) {
            return Err(ConfigError::BlankNote(index));
        }
        validate_log_file_name(&self.filename)?;
        Ok(())
    }

    /// The repository path must exist and be a directory.
    pub fn ensure_repository(&self) -> Result<(), ConfigError> {
        if !self.repo_path.exists() {
            return Err(ConfigError::RepositoryNotFound(self.repo_path.clone()));
        }
        if !self.repo_path.is_dir() {
            return Err(ConfigError::NotADirectory(self.repo_path.clone()));
        }
        Ok(())
    }

    /// `<repo_path>/<filename>`.
    pub fn log_path(&self) -> PathBuf {
        self.repo_path.join(&self.filename)
    }
}

// ── Errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error on `{}`: {error}", .path.display())]
    Io { path: PathBuf, error: std::io::Error },

    #[error("config parse error in `{}`: {error}", .path.display())]
    Parse { path: PathBuf, error: toml::de::Error },

    #[error("config serialize error: {0}")]
    Serialize(toml::ser::Error),

    #[error("config file already exists at `{}` (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("no repository path configured (set `repo_path` or pass --repo)")]
    MissingRepository,

    #[error("repository path not found: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("repository path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("probability must be between 0 and 1, got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("at least one note phrase is required")]
    NoNotes,

    #[error("note phrase #{0} is blank")]
    BlankNote(usize),

    #[error(transparent)]
    LogFile(#[from] LogPathError),
}
