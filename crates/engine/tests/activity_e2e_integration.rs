use std::path::Path;
use std::process::Command;

use cadence_engine::clock::FixedClock;
use cadence_engine::config::{ActivityConfig, ConfigFile, ConfigOverrides};
use cadence_engine::git::GitWorker;
use cadence_engine::random::ScriptedRandom;
use cadence_engine::simulator::{ActivitySimulator, RunOutcome};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn run_git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("git command should execute");
    assert!(
        output.status.success(),
        "git {:?} failed\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn monday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|date| date.and_hms_opt(9, 14, 3))
        .expect("valid timestamp")
}

/// A clone with one pushed commit, tracking a bare remote.
fn seeded_repository(temp: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let remote_path = temp.path().join("remote.git");
    let repo_path = temp.path().join("repo");

    run_git(temp.path(), &["init", "--bare", remote_path.to_str().expect("utf8 remote path")]);
    run_git(temp.path(), &["init", "-b", "main", repo_path.to_str().expect("utf8 repo path")]);

    run_git(&repo_path, &["config", "user.name", "Cadence Bot"]);
    run_git(&repo_path, &["config", "user.email", "cadence-bot@example.test"]);
    run_git(&repo_path, &["config", "commit.gpgsign", "false"]);
    run_git(
        &repo_path,
        &["remote", "add", "origin", remote_path.to_str().expect("utf8 remote path")],
    );

    std::fs::write(repo_path.join("README.md"), "# notes\n").expect("seed file should be written");
    run_git(&repo_path, &["add", "."]);
    run_git(&repo_path, &["commit", "-m", "chore: initial commit"]);
    run_git(&repo_path, &["push", "-u", "origin", "main"]);

    (repo_path, remote_path)
}

fn config_for(repo: &Path, dry_run: bool) -> ActivityConfig {
    let overrides =
        ConfigOverrides { repo_path: Some(repo.to_path_buf()), dry_run, ..Default::default() };
    ActivityConfig::resolve(ConfigFile::default(), overrides).expect("config should resolve")
}

#[test]
fn activity_run_commits_and_pushes_to_remote() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let temp = TempDir::new().expect("tempdir should be created");
    let (repo_path, remote_path) = seeded_repository(&temp);

    let config = config_for(&repo_path, false);
    let mut simulator = ActivitySimulator::new(
        config,
        GitWorker::new(&repo_path),
        ScriptedRandom::new([0.1], [2]),
        FixedClock(monday_morning()),
    );

    let outcome = simulator.run().expect("run should succeed");
    let expected_message = "Automated activity: 2026-10-19T09:14:03 — daily log entry";
    match &outcome {
        RunOutcome::Pushed { commit_message, .. } => assert_eq!(commit_message, expected_message),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let log = std::fs::read_to_string(repo_path.join("activity_log.txt")).expect("log exists");
    assert_eq!(log, "2026-10-19T09:14:03 — daily log entry\n");

    let remote_head = run_git(&remote_path, &["log", "-1", "--format=%s", "main"]);
    assert_eq!(remote_head.trim(), expected_message);

    let status = run_git(&repo_path, &["status", "--porcelain"]);
    assert!(status.trim().is_empty(), "working tree should be clean: {status}");
}

#[test]
fn activity_run_dry_run_stages_without_committing() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let temp = TempDir::new().expect("tempdir should be created");
    let (repo_path, remote_path) = seeded_repository(&temp);

    let mut simulator = ActivitySimulator::new(
        config_for(&repo_path, true),
        GitWorker::new(&repo_path),
        ScriptedRandom::new([0.0], [0]),
        FixedClock(monday_morning()),
    );

    let outcome = simulator.run().expect("run should succeed");
    assert!(matches!(outcome, RunOutcome::DryRun { .. }), "unexpected outcome: {outcome:?}");

    let status = run_git(&repo_path, &["status", "--porcelain"]);
    assert_eq!(status.trim(), "A  activity_log.txt");

    let remote_head = run_git(&remote_path, &["log", "-1", "--format=%s", "main"]);
    assert_eq!(remote_head.trim(), "chore: initial commit");
}

#[test]
fn ignored_log_file_fails_at_stage_and_keeps_the_line() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let temp = TempDir::new().expect("tempdir should be created");
    let (repo_path, _remote_path) = seeded_repository(&temp);
    std::fs::write(repo_path.join(".gitignore"), "activity_log.txt\n").expect("gitignore written");

    let mut simulator = ActivitySimulator::new(
        config_for(&repo_path, false),
        GitWorker::new(&repo_path),
        ScriptedRandom::new([0.0], [0]),
        FixedClock(monday_morning()),
    );

    let error = simulator.run().expect_err("git add of an ignored file should fail");
    assert!(error.to_string().starts_with("git add failed: "), "unexpected error: {error}");

    let log = std::fs::read_to_string(repo_path.join("activity_log.txt")).expect("log exists");
    assert_eq!(log.lines().count(), 1);
}
