// `cadence doctor` — read-only environment diagnostics.

use std::io::IsTerminal;
use std::path::Path;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use cadence_common::calendar::rest_day_of;
use cadence_engine::activity_log::last_record;
use cadence_engine::clock::{Clock, SystemClock};
use cadence_engine::config::{default_config_path, ActivityConfig, ConfigOverrides};
use cadence_engine::git::{CommandExecutor, GitWorker};

use super::ConfigArgs;
use crate::output::{self, OutputFormat};

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Args)]
pub struct DoctorArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum DoctorStatus {
    Pass,
    Warning,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorCheck {
    name: String,
    status: DoctorStatus,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl DoctorCheck {
    fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self { name: name.to_string(), status: DoctorStatus::Pass, detail: detail.into(), hint: None }
    }

    fn warning(name: &str, detail: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: DoctorStatus::Warning,
            detail: detail.into(),
            hint: Some(hint.into()),
        }
    }

    fn fail(name: &str, detail: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: DoctorStatus::Fail,
            detail: detail.into(),
            hint: Some(hint.into()),
        }
    }
}

pub fn run(args: DoctorArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let checks = collect_checks(&args.config, &SystemClock);

    output::print_output(format, &checks, |items| format_human(items))?;
    if checks.iter().any(|check| check.status == DoctorStatus::Fail) {
        anyhow::bail!("doctor checks failed");
    }
    Ok(())
}

fn collect_checks(args: &ConfigArgs, clock: &impl Clock) -> Vec<DoctorCheck> {
    let mut checks = Vec::new();

    let (config_check, config) = check_config(args);
    checks.push(config_check);

    let Some(config) = config else {
        checks.push(check_git_binary(&GitWorker::new(".")));
        return checks;
    };

    let repository = check_repository(&config);
    let repository_ok = repository.status == DoctorStatus::Pass;
    checks.push(repository);

    let worker = GitWorker::new(if repository_ok { config.repo_path.as_path() } else { Path::new(".") });
    let git = check_git_binary(&worker);
    let git_ok = git.status == DoctorStatus::Pass;
    checks.push(git);

    if repository_ok && git_ok {
        checks.push(check_git_status(&worker));
        checks.push(check_activity_log(&config));
    }
    checks.push(check_schedule(&config, clock));

    checks
}

fn check_config(args: &ConfigArgs) -> (DoctorCheck, Option<ActivityConfig>) {
    let source = match (&args.config, default_config_path()) {
        (Some(path), _) => format!("`{}`", path.display()),
        (None, Some(path)) if path.exists() => format!("`{}`", path.display()),
        _ => "built-in defaults".to_string(),
    };

    match args.resolve(ConfigOverrides::default()) {
        Ok(config) => {
            debug!(?config, "resolved configuration");
            (
                DoctorCheck::pass(
                    "config",
                    format!(
                        "loaded from {source}: file `{}`, probability {}{}",
                        config.filename,
                        config.probability,
                        if config.dry_run { ", dry run" } else { "" }
                    ),
                ),
                Some(config),
            )
        }
        Err(error) => (
            DoctorCheck::fail(
                "config",
                format!("configuration from {source} is invalid: {error:#}"),
                "Run: cadence init --repo <path> (or fix ~/.cadence/config.toml)",
            ),
            None,
        ),
    }
}

fn check_repository(config: &ActivityConfig) -> DoctorCheck {
    match config.ensure_repository() {
        Ok(()) => DoctorCheck::pass(
            "repository",
            format!("using repository at `{}`", config.repo_path.display()),
        ),
        Err(error) => DoctorCheck::fail(
            "repository",
            error.to_string(),
            "Set repo_path in ~/.cadence/config.toml or pass --repo",
        ),
    }
}

fn check_git_binary<E: CommandExecutor>(worker: &GitWorker<E>) -> DoctorCheck {
    match worker.version() {
        Ok(output) => DoctorCheck::pass("git", output.stdout.trim().to_string()),
        Err(error) => DoctorCheck::fail("git", error.to_string(), "Install git and add it to PATH"),
    }
}

fn check_git_status<E: CommandExecutor>(worker: &GitWorker<E>) -> DoctorCheck {
    match worker.status() {
        Ok(output) => {
            let pending = output.stdout.lines().filter(|line| !line.trim().is_empty()).count();
            if pending == 0 {
                DoctorCheck::pass("git_status", "working tree clean")
            } else {
                DoctorCheck::warning(
                    "git_status",
                    format!("{pending} uncommitted change(s)"),
                    "A run stages only the activity log; other changes stay uncommitted",
                )
            }
        }
        Err(error) => DoctorCheck::fail(
            "git_status",
            error.to_string(),
            "Make sure repo_path points at a git working tree",
        ),
    }
}

fn check_activity_log(config: &ActivityConfig) -> DoctorCheck {
    let path = config.log_path();
    match last_record(&path) {
        Ok(Some(record)) => {
            DoctorCheck::pass("activity_log", format!("last entry: {}", record.log_line()))
        }
        Ok(None) => DoctorCheck::warning(
            "activity_log",
            format!("no activity recorded yet in `{}`", path.display()),
            "The file is created on the first run that rolls below the probability",
        ),
        Err(error) => DoctorCheck::fail(
            "activity_log",
            format!("failed to read `{}`: {error}", path.display()),
            "Check permissions on the activity log",
        ),
    }
}

fn check_schedule(config: &ActivityConfig, clock: &impl Clock) -> DoctorCheck {
    match rest_day_of(clock.now()) {
        Some(weekday) => DoctorCheck::pass(
            "schedule",
            format!("today is a rest day ({weekday}); runs will exit without acting"),
        ),
        None if config.probability <= 0.0 => DoctorCheck::warning(
            "schedule",
            "probability is 0; runs will never record activity",
            "Raise probability in ~/.cadence/config.toml",
        ),
        None => DoctorCheck::pass(
            "schedule",
            format!("today is a working day; activity chance {}", config.probability),
        ),
    }
}

fn format_human(checks: &[DoctorCheck]) -> String {
    let use_color = std::io::stdout().is_terminal();
    let mut lines = Vec::new();

    for check in checks {
        let (symbol, color) = match check.status {
            DoctorStatus::Pass => ("✓", ANSI_GREEN),
            DoctorStatus::Warning => ("⚠", ANSI_YELLOW),
            DoctorStatus::Fail => ("✗", ANSI_RED),
        };
        let rendered_symbol =
            if use_color { format!("{color}{symbol}{ANSI_RESET}") } else { symbol.to_string() };
        lines.push(format!("{rendered_symbol} {}: {}", check.name, check.detail));
        if let Some(hint) = &check.hint {
            lines.push(format!("  hint: {hint}"));
        }
    }

    let passed = checks.iter().filter(|check| check.status == DoctorStatus::Pass).count();
    let warnings = checks.iter().filter(|check| check.status == DoctorStatus::Warning).count();
    let failed = checks.iter().filter(|check| check.status == DoctorStatus::Fail).count();
    lines.push(String::new());
    lines.push(format!("Summary: {passed} passed, {warnings} warning(s), {failed} failed"));
    lines.join("\n")
}
