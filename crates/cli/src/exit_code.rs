// Consistent exit codes for the cadence CLI.
//
//   0 = success, or a run that ended without acting
//   1 = general error
//   2 = configuration error
//   3 = activity log write failure
//   4 = git status failure
//   5 = git add failure
//   6 = git push failure
//   7 = unexpected failure while running git

use std::process;

use cadence_engine::config::ConfigError;
use cadence_engine::error::ActivityError;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Config = 2,
    WriteLog = 3,
    GitStatus = 4,
    GitAdd = 5,
    GitPush = 6,
    GitUnexpected = 7,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by inspecting the error chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(activity_err) = cause.downcast_ref::<ActivityError>() {
                return Self::from_activity_error(activity_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return Self::Config;
            }
        }

        Self::Error
    }

    pub fn from_activity_error(err: &ActivityError) -> Self {
        match err {
            ActivityError::Configuration(_) => Self::Config,
            ActivityError::WriteLog { .. } => Self::WriteLog,
            ActivityError::Probe(_) => Self::GitStatus,
            ActivityError::Stage(_) => Self::GitAdd,
            ActivityError::Push(_) => Self::GitPush,
            ActivityError::VersionControl { .. } => Self::GitUnexpected,
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}
