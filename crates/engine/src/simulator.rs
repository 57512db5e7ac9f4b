// The activity pipeline: validate, gate, append, stage, commit, push.
//
// Every step can end the run. Nothing is retried and the appended line is
// kept even when a later git step fails.

use cadence_common::calendar::rest_day_of;
use cadence_common::record::ActivityRecord;
use chrono::Weekday;
use serde::Serialize;
use tracing::{info, warn};

use crate::activity_log::append_record;
use crate::clock::{Clock, SystemClock};
use crate::config::ActivityConfig;
use crate::error::{ActivityError, GitStep};
use crate::gate::{decide, GateDecision};
use crate::git::{CommitOutcome, VersionControlClient};
use crate::random::{RandomSource, ThreadRandom};

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    RestDay { weekday: Weekday },
    Skipped { roll: f64, probability: f64 },
    DryRun { record: ActivityRecord, commit_message: String },
    NothingToCommit { record: ActivityRecord, commit_message: String, output: String },
    Pushed { record: ActivityRecord, commit_message: String },
}

impl RunOutcome {
    /// The record appended during this run, if the log was touched.
    pub fn record(&self) -> Option<&ActivityRecord> {
        match self {
            RunOutcome::RestDay { .. } | RunOutcome::Skipped { .. } => None,
            RunOutcome::DryRun { record, .. }
            | RunOutcome::NothingToCommit { record, .. }
            | RunOutcome::Pushed { record, .. } => Some(record),
        }
    }
}

pub struct ActivitySimulator<V, R = ThreadRandom, C = SystemClock> {
    config: ActivityConfig,
    vcs: V,
    random: R,
    clock: C,
}

impl<V: VersionControlClient> ActivitySimulator<V> {
    /// Wall clock and thread-local entropy.
    pub fn with_defaults(config: ActivityConfig, vcs: V) -> Self {
        Self::new(config, vcs, ThreadRandom, SystemClock)
    }
}

impl<V, R, C> ActivitySimulator<V, R, C>
where
    V: VersionControlClient,
    R: RandomSource,
    C: Clock,
{
    pub fn new(config: ActivityConfig, vcs: V, random: R, clock: C) -> Self {
        Self { config, vcs, random, clock }
    }

    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    pub fn run(&mut self) -> Result<RunOutcome, ActivityError> {
        self.config.validate()?;
        self.config.ensure_repository()?;

        let now = self.clock.now();
        let decision = match rest_day_of(now) {
            Some(weekday) => GateDecision::RestDay { weekday },
            None => decide(now, self.random.next_unit(), self.config.probability),
        };

        match decision {
            GateDecision::RestDay { weekday } => {
                info!(%weekday, "not a working day, nothing to do");
                return Ok(RunOutcome::RestDay { weekday });
            }
            GateDecision::Skip { roll, probability } => {
                info!("random roll {roll:.3} (need < {probability}), skipping this run");
                return Ok(RunOutcome::Skipped { roll, probability });
            }
            GateDecision::Proceed { roll } => {
                let probability = self.config.probability;
                info!("random roll {roll:.3} (need < {probability}), recording activity");
            }
        }

        let record = ActivityRecord::new(now, self.pick_note());
        let log_path = self.config.log_path();
        append_record(&log_path, &record)
            .map_err(|error| ActivityError::WriteLog { path: log_path.clone(), error })?;
        info!(path = %log_path.display(), line = %record.log_line(), "appended activity line");

        self.vcs.probe().map_err(|error| ActivityError::from_git(GitStep::Probe, error))?;
        self.vcs
            .stage(&self.config.filename)
            .map_err(|error| ActivityError::from_git(GitStep::Stage, error))?;

        let commit_message = record.commit_message();
        if self.config.dry_run {
            info!(%commit_message, "dry run, would commit");
            return Ok(RunOutcome::DryRun { record, commit_message });
        }

        let outcome = self
            .vcs
            .commit(&commit_message)
            .map_err(|error| ActivityError::from_git(GitStep::Commit, error))?;
        if let CommitOutcome::NothingToCommit { output } = outcome {
            warn!(output = %output.trim(), "git commit returned non-zero, not pushing");
            return Ok(RunOutcome::NothingToCommit { record, commit_message, output });
        }

        self.vcs.push().map_err(|error| ActivityError::from_git(GitStep::Push, error))?;
        info!(%commit_message, "committed and pushed");
        Ok(RunOutcome::Pushed { record, commit_message })
    }

    fn pick_note(&mut self) -> String {
        let notes = &self.config.notes;
        let index = self.random.choose(notes.len()).min(notes.len().saturating_sub(1));
        notes.get(index).cloned().unwrap_or_default()
    }
}
