// Git plumbing: subprocess worker and the narrow client the simulator talks to.

pub mod client;
pub mod worker;

pub use client::{CommitOutcome, VersionControlClient};
pub use worker::{CommandExecutor, CommandResult, GitCommandOutput, GitError, GitWorker};
