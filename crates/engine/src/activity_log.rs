// Append-only activity log inside the repository.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use cadence_common::record::ActivityRecord;

/// Append one line for `record`, creating the file if absent.
///
/// The parent directory must already exist.
pub fn append_record(path: &Path, record: &ActivityRecord) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line = format!("{}\n", record.log_line());
    file.write_all(line.as_bytes())?;
    file.flush()
}

/// The most recent parseable record, or `None` if the log is missing or
/// holds no records.
pub fn last_record(path: &Path) -> io::Result<Option<ActivityRecord>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error),
    };
    Ok(contents.lines().rev().find_map(ActivityRecord::parse_line))
}
