//! Append-only progress log

use crate::error::{EtlError, EtlResult};
use chrono::{DateTime, Local, TimeZone};
use std::io::Write;
use std::path::{Path, PathBuf};

/// `2023-Sep-08-09:16:35`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Appends one timestamped line per checkpoint to a text file.
///
/// The file is opened and closed on every call.
#[derive(Clone, Debug)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append `message` stamped with the current local time
    pub fn record(&self, message: &str) -> EtlResult<()> {
        self.record_at(&Local::now(), message)
    }

    /// Append `message` stamped with `time`
    pub fn record_at<Tz: TimeZone>(&self, time: &DateTime<Tz>, message: &str) -> EtlResult<()>
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| EtlError::io(&self.path, e))?;

        writeln!(file, "{}", format_entry(time, message)).map_err(|e| EtlError::io(&self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render a log line without the trailing newline
pub fn format_entry<Tz: TimeZone>(time: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} : {}", time.format(TIMESTAMP_FORMAT), message)
}
