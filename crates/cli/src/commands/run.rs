// `cadence run` — one pass of the activity pipeline.

use clap::Args;

use cadence_engine::config::ConfigOverrides;
use cadence_engine::git::GitWorker;
use cadence_engine::simulator::{ActivitySimulator, RunOutcome};

use super::ConfigArgs;
use crate::output::{self, OutputFormat};

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Log file relative to the repository root (overrides `filename`).
    #[arg(long, value_name = "NAME")]
    file: Option<String>,

    /// Chance in [0, 1] of recording activity on a working day.
    #[arg(long, value_name = "P")]
    probability: Option<f64>,

    /// Append to the log but do not commit or push.
    #[arg(long)]
    dry_run: bool,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);

    match execute(&args) {
        Ok(outcome) => {
            if let RunOutcome::NothingToCommit { output, .. } = &outcome {
                output::print_warning(
                    format,
                    "NOTHING_TO_COMMIT",
                    &format!("git commit returned non-zero, not pushing: {}", output.trim()),
                );
            }
            output::print_output(format, &outcome, format_human)?;
            Ok(())
        }
        Err(error) => {
            output::print_anyhow_error(format, &error);
            Err(error)
        }
    }
}

fn execute(args: &RunArgs) -> anyhow::Result<RunOutcome> {
    let config = args.config.resolve(overrides(args))?;
    let worker = GitWorker::new(config.repo_path.clone());
    let mut simulator = ActivitySimulator::with_defaults(config, worker);
    Ok(simulator.run()?)
}

fn overrides(args: &RunArgs) -> ConfigOverrides {
    ConfigOverrides {
        repo_path: None,
        filename: args.file.clone(),
        probability: args.probability,
        dry_run: args.dry_run,
    }
}

fn format_human(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::RestDay { weekday } => format!("Not a working day ({weekday}). Exiting."),
        RunOutcome::Skipped { roll, probability } => {
            format!("Skipping this run: rolled {roll:.3}, needed < {probability}.")
        }
        RunOutcome::DryRun { commit_message, .. } => {
            format!("[DRY RUN] Would commit with message: {commit_message}")
        }
        RunOutcome::NothingToCommit { commit_message, .. } => {
            format!("Nothing committed for: {commit_message}")
        }
        RunOutcome::Pushed { commit_message, .. } => {
            format!("Success: committed and pushed: {commit_message}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_common::record::ActivityRecord;
    use chrono::{NaiveDate, Weekday};
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: RunArgs,
    }

    fn record() -> ActivityRecord {
        let timestamp = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|date| date.and_hms_opt(9, 14, 3))
            .expect("valid timestamp");
        ActivityRecord::new(timestamp, "daily log entry")
    }

    #[test]
    fn flags_become_overrides() {
        let harness = Harness::parse_from([
            "cadence",
            "--repo",
            "/srv/repo",
            "--file",
            "notes.txt",
            "--probability",
            "0.25",
            "--dry-run",
        ]);
        let overrides = overrides(&harness.args);
        assert_eq!(overrides.filename.as_deref(), Some("notes.txt"));
        assert_eq!(overrides.probability, Some(0.25));
        assert!(overrides.dry_run);
        assert_eq!(harness.args.config.repo.as_deref(), Some(std::path::Path::new("/srv/repo")));
    }

    #[test]
    fn pushed_summary_contains_commit_message() {
        let record = record();
        let outcome =
            RunOutcome::Pushed { commit_message: record.commit_message(), record: record.clone() };
        assert_eq!(
            format_human(&outcome),
            "Success: committed and pushed: Automated activity: 2026-10-19T09:14:03 — daily log entry"
        );
    }

    #[test]
    fn no_op_summaries_explain_why() {
        assert_eq!(
            format_human(&RunOutcome::RestDay { weekday: Weekday::Sat }),
            "Not a working day (Sat). Exiting."
        );
        assert_eq!(
            format_human(&RunOutcome::Skipped { roll: 0.8123, probability: 0.7 }),
            "Skipping this run: rolled 0.812, needed < 0.7."
        );
    }

    #[test]
    fn dry_run_summary_reports_would_be_message() {
        let record = record();
        let outcome =
            RunOutcome::DryRun { commit_message: record.commit_message(), record: record.clone() };
        assert!(format_human(&outcome).starts_with("[DRY RUN] Would commit with message: "));
    }
}
