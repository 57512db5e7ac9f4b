// Failure classes of an activity run. Each one ends the run.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::git::GitError;

/// The git step that was running when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    Probe,
    Stage,
    Commit,
    Push,
}

impl Display for GitStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GitStep::Probe => "git status",
            GitStep::Stage => "git add",
            GitStep::Commit => "git commit",
            GitStep::Push => "git push",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("configuration error: {0}")]
    Configuration(ConfigError),

    #[error("failed to write `{}`: {error}", .path.display())]
    WriteLog { path: PathBuf, error: std::io::Error },

    #[error("git status failed: {0}")]
    Probe(GitError),

    #[error("git add failed: {0}")]
    Stage(GitError),

    #[error("git push failed: {0}")]
    Push(GitError),

    #[error("unexpected failure during {step}: {error}")]
    VersionControl { step: GitStep, error: GitError },
}

impl ActivityError {
    /// Classify a git failure by step. Spawn failures are unexpected
    /// wherever they happen.
    pub fn from_git(step: GitStep, error: GitError) -> Self {
        if error.is_spawn_failure() {
            return ActivityError::VersionControl { step, error };
        }
        match step {
            GitStep::Probe => ActivityError::Probe(error),
            GitStep::Stage => ActivityError::Stage(error),
            GitStep::Push => ActivityError::Push(error),
            GitStep::Commit => ActivityError::VersionControl { step, error },
        }
    }
}

impl From<ConfigError> for ActivityError {
    fn from(error: ConfigError) -> Self {
        ActivityError::Configuration(error)
    }
}
