// The four git capabilities an activity run needs.

use super::worker::{CommandExecutor, GitCommandOutput, GitError, GitWorker};

/// What a commit attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created,
    /// `git commit` exited non-zero. Any failure lands here, not only an
    /// unchanged tree; `output` is what git printed.
    NothingToCommit { output: String },
}

pub trait VersionControlClient {
    /// Read-only check that the repository responds.
    fn probe(&self) -> Result<GitCommandOutput, GitError>;

    fn stage(&self, file: &str) -> Result<GitCommandOutput, GitError>;

    /// Only spawn failures are errors; a non-zero exit is
    /// [`CommitOutcome::NothingToCommit`].
    fn commit(&self, message: &str) -> Result<CommitOutcome, GitError>;

    fn push(&self) -> Result<GitCommandOutput, GitError>;
}

impl<T: VersionControlClient + ?Sized> VersionControlClient for &T {
    fn probe(&self) -> Result<GitCommandOutput, GitError> {
        (**self).probe()
    }

    fn stage(&self, file: &str) -> Result<GitCommandOutput, GitError> {
        (**self).stage(file)
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome, GitError> {
        (**self).commit(message)
    }

    fn push(&self) -> Result<GitCommandOutput, GitError> {
        (**self).push()
    }
}

impl<E: CommandExecutor> VersionControlClient for GitWorker<E> {
    fn probe(&self) -> Result<GitCommandOutput, GitError> {
        self.status()
    }

    fn stage(&self, file: &str) -> Result<GitCommandOutput, GitError> {
        self.add(&[file])
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome, GitError> {
        let result = GitWorker::commit(self, message)?;
        if result.success {
            return Ok(CommitOutcome::Created);
        }

        let output = if result.stdout.trim().is_empty() { result.stderr } else { result.stdout };
        Ok(CommitOutcome::NothingToCommit { output })
    }

    fn push(&self) -> Result<GitCommandOutput, GitError> {
        GitWorker::push(self)
    }
}
