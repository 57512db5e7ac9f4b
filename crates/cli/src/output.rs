// Output format auto-detection for the CLI.
//
// TTY → human-readable text. Piped/redirected → structured JSON.
// `--json` flag forces JSON output regardless of terminal.

use cadence_engine::config::ConfigError;
use cadence_engine::error::ActivityError;
use cadence_engine::git::GitError;

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per response).
    Json,
}

impl OutputFormat {
    /// Auto-detect format: JSON if `--json` was passed or stdout is not a TTY.
    pub fn detect(json_flag: bool) -> Self {
        if json_flag {
            return Self::Json;
        }
        Self::detect_from_terminal(io::stdout().is_terminal())
    }

    /// Testable variant that takes an explicit `is_tty` flag.
    pub fn detect_from_terminal(is_tty: bool) -> Self {
        if is_tty {
            Self::Human
        } else {
            Self::Json
        }
    }
}

/// Write a value to stdout in the selected format.
pub fn print_output<T, F>(format: OutputFormat, value: &T, human_fn: F) -> io::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let mut out = io::stdout().lock();
    write_output(&mut out, format, value, human_fn)
}

/// Write a value to a provided writer (useful for testing).
pub fn write_output<W, T, F>(
    writer: &mut W,
    format: OutputFormat,
    value: &T,
    human_fn: F,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Human => {
            writeln!(writer, "{}", human_fn(value))
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
            writeln!(writer)
        }
    }
}

/// Write an error to stderr in the selected format.
pub fn print_error(format: OutputFormat, code: &str, message: &str) {
    let mut err = io::stderr().lock();
    match format {
        OutputFormat::Human => {
            let line =
                render_human_stderr_line("error", message, io::stderr().is_terminal(), ANSI_RED);
            let _ = writeln!(err, "{line}");
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "error": {
                    "code": code,
                    "message": message,
                }
            });
            let _ = serde_json::to_writer(&mut err, &obj);
            let _ = writeln!(err);
        }
    }
}

/// Write a warning to stderr in the selected format.
pub fn print_warning(format: OutputFormat, code: &str, message: &str) {
    let mut err = io::stderr().lock();
    match format {
        OutputFormat::Human => {
            let line = render_human_stderr_line(
                "warning",
                message,
                io::stderr().is_terminal(),
                ANSI_YELLOW,
            );
            let _ = writeln!(err, "{line}");
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "warning": {
                    "code": code,
                    "message": message,
                }
            });
            let _ = serde_json::to_writer(&mut err, &obj);
            let _ = writeln!(err);
        }
    }
}

/// Print a mapped, actionable error for a command failure.
pub fn print_anyhow_error(format: OutputFormat, error: &anyhow::Error) {
    let (code, message) = actionable_error(error);
    print_error(format, code, &message);
}

fn actionable_error(error: &anyhow::Error) -> (&'static str, String) {
    let message = format!("{error:#}");

    for cause in error.chain() {
        if let Some(activity) = cause.downcast_ref::<ActivityError>() {
            return activity_error_code(activity, message);
        }
        if let Some(config) = cause.downcast_ref::<ConfigError>() {
            return ("CONFIG_INVALID", with_config_hint(config, message));
        }
    }

    ("ERROR", message)
}

fn activity_error_code(error: &ActivityError, message: String) -> (&'static str, String) {
    match error {
        ActivityError::Configuration(config) => {
            ("CONFIG_INVALID", with_config_hint(config, message))
        }
        ActivityError::WriteLog { .. } => ("LOG_WRITE_FAILED", message),
        ActivityError::Probe(_) => (
            "GIT_STATUS_FAILED",
            format!("{message}. Check that the repository path is a git working tree"),
        ),
        ActivityError::Stage(_) => ("GIT_ADD_FAILED", message),
        ActivityError::Push(_) => (
            "GIT_PUSH_FAILED",
            format!("{message}. Check the upstream branch and credentials"),
        ),
        ActivityError::VersionControl { error: GitError::SpawnFailed { .. }, .. } => {
            ("GIT_UNEXPECTED", format!("{message}. Is git installed and on PATH?"))
        }
        ActivityError::VersionControl { .. } => ("GIT_UNEXPECTED", message),
    }
}

fn with_config_hint(error: &ConfigError, message: String) -> String {
    match error {
        ConfigError::MissingRepository => format!("{message}. Run: cadence init --repo <path>"),
        ConfigError::RepositoryNotFound(_) | ConfigError::NotADirectory(_) => {
            format!("{message}. Fix repo_path in ~/.cadence/config.toml or pass --repo")
        }
        _ => message,
    }
}

fn render_human_stderr_line(label: &str, message: &str, is_tty: bool, color: &str) -> String {
    if is_tty {
        format!("{color}{label}:{ANSI_RESET} {message}")
    } else {
        format!("{label}: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detect_tty_returns_human() {
        assert_eq!(OutputFormat::detect_from_terminal(true), OutputFormat::Human);
    }

    #[test]
    fn detect_pipe_returns_json() {
        assert_eq!(OutputFormat::detect_from_terminal(false), OutputFormat::Json);
    }

    #[test]
    fn detect_json_flag_overrides_tty() {
        assert_eq!(OutputFormat::detect(true), OutputFormat::Json);
    }

    #[test]
    fn write_output_human_format() {
        #[derive(Serialize)]
        struct Info {
            message: String,
        }
        let info = Info { message: "pushed".into() };
        let mut buf = Vec::new();
        write_output(&mut buf, OutputFormat::Human, &info, |i| format!("Success: {}", i.message))
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Success: pushed\n");
    }

    #[test]
    fn write_output_json_does_not_call_human_fn() {
        #[derive(Serialize)]
        struct Info {
            roll: f64,
        }
        let mut buf = Vec::new();
        write_output(&mut buf, OutputFormat::Json, &Info { roll: 0.25 }, |_| {
            unreachable!("human_fn should not be called in JSON mode")
        })
        .unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(parsed["roll"], 0.25);
    }

    #[test]
    fn print_error_and_warning_do_not_panic() {
        print_error(OutputFormat::Human, "TEST_ERR", "something broke");
        print_error(OutputFormat::Json, "TEST_ERR", "something broke");
        print_warning(OutputFormat::Json, "WARN", "heads up");
    }

    #[test]
    fn render_human_error_uses_color_for_tty() {
        let line = render_human_stderr_line("error", "boom", true, ANSI_RED);
        assert!(line.contains(ANSI_RED));
        assert!(line.contains(ANSI_RESET));
        assert!(line.contains("boom"));
    }

    #[test]
    fn render_human_warning_without_tty_is_plain() {
        let line = render_human_stderr_line("warning", "careful", false, ANSI_YELLOW);
        assert_eq!(line, "warning: careful");
    }

    #[test]
    fn actionable_error_missing_repository_suggests_init() {
        let err = anyhow::Error::new(ActivityError::from(ConfigError::MissingRepository));
        let (code, message) = actionable_error(&err);
        assert_eq!(code, "CONFIG_INVALID");
        assert!(message.contains("cadence init --repo"));
    }

    #[test]
    fn actionable_error_repository_not_found_names_path() {
        let err = anyhow::Error::new(ActivityError::from(ConfigError::RepositoryNotFound(
            PathBuf::from("/srv/missing"),
        )));
        let (code, message) = actionable_error(&err);
        assert_eq!(code, "CONFIG_INVALID");
        assert!(message.contains("/srv/missing"));
        assert!(message.contains("--repo"));
    }

    #[test]
    fn actionable_error_spawn_failure_mentions_path() {
        let err = anyhow::Error::new(ActivityError::VersionControl {
            step: cadence_engine::error::GitStep::Probe,
            error: GitError::SpawnFailed { command: "git status".into(), message: "nope".into() },
        });
        let (code, message) = actionable_error(&err);
        assert_eq!(code, "GIT_UNEXPECTED");
        assert!(message.contains("Is git installed"));
    }

    #[test]
    fn actionable_error_push_failure_code() {
        let err = anyhow::Error::new(ActivityError::Push(GitError::CommandFailed {
            command: "git push".into(),
            code: Some(1),
            output: "rejected".into(),
        }));
        let (code, message) = actionable_error(&err);
        assert_eq!(code, "GIT_PUSH_FAILED");
        assert!(message.starts_with("git push failed: "));
    }

    #[test]
    fn actionable_error_generic_passes_message_through() {
        let err = anyhow::anyhow!("output closed");
        assert_eq!(actionable_error(&err), ("ERROR", "output closed".to_string()));
    }
}
