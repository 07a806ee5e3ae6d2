//! Errors raised while reading a single metric field.
//!
//! These never escape the provider: each one is logged and the field it
//! belongs to reads as unavailable.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    /// The helper command could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The helper command was killed after running too long.
    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The helper command ran but reported failure.
    #[error("`{command}` exited with {status}")]
    Exit { command: String, status: ExitStatus },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected {what} value {input:?}")]
    Parse { what: &'static str, input: String },

    /// No disk is mounted at the monitored path.
    #[error("nothing mounted at {0}")]
    MountNotFound(String),

    /// Neither the thermal zone nor any sysinfo component had a reading.
    #[error("no CPU temperature sensor found")]
    NoSensor,
}

pub type MetricResult<T> = std::result::Result<T, MetricError>;
