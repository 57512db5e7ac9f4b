// Log file name validation: relative, no traversal, no null bytes.

use std::path::{Component, Path};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogPathError {
    #[error("log file name is empty")]
    Empty,

    #[error("log file name contains null byte")]
    NullByte,

    #[error("log file name must be relative to the repository root: {0}")]
    Absolute(String),

    #[error("log file name contains directory traversal component: {0}")]
    Traversal(String),
}

/// Check that `name` stays inside the repository it is joined onto.
///
/// Nested names such as `logs/activity.txt` are accepted; the parent
/// directory is not created on demand.
pub fn validate_log_file_name(name: &str) -> Result<(), LogPathError> {
    if name.trim().is_empty() {
        return Err(LogPathError::Empty);
    }

    if name.contains('\0') {
        return Err(LogPathError::NullByte);
    }

    let path = Path::new(name);
    if path.is_absolute() || name.starts_with('/') || name.starts_with('\\') {
        return Err(LogPathError::Absolute(name.to_string()));
    }

    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(LogPathError::Traversal(name.to_string())),
            Component::RootDir | Component::Prefix(_) => {
                return Err(LogPathError::Absolute(name.to_string()))
            }
        }
    }

    Ok(())
}
