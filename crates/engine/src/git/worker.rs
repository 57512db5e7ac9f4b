use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl GitCommandOutput {
    /// Stdout if it carries anything, else stderr.
    pub fn text(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitError {
    EmptyAddPaths,
    SpawnFailed { command: String, message: String },
    CommandFailed { command: String, code: Option<i32>, output: String },
}

impl GitError {
    /// The `git` program could not be started at all.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, GitError::SpawnFailed { .. })
    }
}

impl Display for GitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::EmptyAddPaths => write!(f, "git add requires at least one path"),
            GitError::SpawnFailed { command, message } => {
                write!(f, "failed to run `{command}`: {message}")
            }
            GitError::CommandFailed { command, code, output } => {
                write!(f, "`{command}` failed with code {:?}: {}", code, output.trim())
            }
        }
    }
}

impl Error for GitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CommandResult, std::io::Error>;
}

/// Runs commands as blocking child processes with captured output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCommandExecutor;

impl CommandExecutor for ProcessCommandExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CommandResult, std::io::Error> {
        let output = Command::new(program).args(args).current_dir(cwd).output()?;
        Ok(CommandResult {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GitWorker<E = ProcessCommandExecutor> {
    repo_path: PathBuf,
    executor: E,
}

impl GitWorker<ProcessCommandExecutor> {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self { repo_path: repo_path.into(), executor: ProcessCommandExecutor }
    }
}

impl<E: CommandExecutor> GitWorker<E> {
    pub fn with_executor(repo_path: impl Into<PathBuf>, executor: E) -> Self {
        Self { repo_path: repo_path.into(), executor }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    pub fn version(&self) -> Result<GitCommandOutput, GitError> {
        self.run(vec!["--version".to_string()])
    }

    pub fn status(&self) -> Result<GitCommandOutput, GitError> {
        self.run(vec!["status".to_string(), "--porcelain".to_string()])
    }

    pub fn add<S: AsRef<str>>(&self, paths: &[S]) -> Result<GitCommandOutput, GitError> {
        if paths.is_empty() {
            return Err(GitError::EmptyAddPaths);
        }

        let mut args = vec!["add".to_string()];
        args.extend(paths.iter().map(|path| path.as_ref().to_string()));
        self.run(args)
    }

    /// `git commit -m <message>`, returning the raw result so callers can
    /// decide what a non-zero exit means.
    pub fn commit(&self, message: &str) -> Result<CommandResult, GitError> {
        self.exec(vec!["commit".to_string(), "-m".to_string(), message.to_string()])
    }

    pub fn push(&self) -> Result<GitCommandOutput, GitError> {
        self.run(vec!["push".to_string()])
    }

    fn run(&self, args: Vec<String>) -> Result<GitCommandOutput, GitError> {
        let command = format!("git {}", args.join(" "));
        let result = self.exec(args)?;

        if result.success {
            return Ok(GitCommandOutput { stdout: result.stdout, stderr: result.stderr });
        }

        let output = if result.stderr.trim().is_empty() { result.stdout } else { result.stderr };

        Err(GitError::CommandFailed { command, code: result.code, output })
    }

    fn exec(&self, args: Vec<String>) -> Result<CommandResult, GitError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, repo = %self.repo_path.display(), "running git");
        let result = self.executor.execute("git", &args, &self.repo_path).map_err(|error| {
            GitError::SpawnFailed { command: command.clone(), message: error.to_string() }
        })?;
        debug!(%command, code = ?result.code, "git exited");
        Ok(result)
    }
}
