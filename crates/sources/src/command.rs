//! Bounded execution of external helper commands

use crate::error::{MetricError, MetricResult};
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Run `argv` and return its trimmed stdout
///
/// The child is killed once `timeout` has passed. A non-zero exit status is an
/// error; empty output is not.
pub fn run_command(argv: &[&str], timeout: Duration) -> MetricResult<String> {
    let command = argv.join(" ");
    let (program, args) = argv.split_first().ok_or_else(|| MetricError::Spawn {
        command: command.clone(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty command line"),
    })?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| MetricError::Spawn {
            command: command.clone(),
            source,
        })?;

    let start = Instant::now();
    loop {
        let waited = child.try_wait().map_err(|source| MetricError::Spawn {
            command: command.clone(),
            source,
        })?;

        match waited {
            Some(status) if status.success() => {
                let mut out = Vec::new();
                if let Some(mut stdout) = child.stdout.take() {
                    stdout
                        .read_to_end(&mut out)
                        .map_err(|source| MetricError::Spawn {
                            command: command.clone(),
                            source,
                        })?;
                }
                return Ok(String::from_utf8_lossy(&out).trim().to_string());
            }
            Some(status) => return Err(MetricError::Exit { command, status }),
            None if start.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(MetricError::Timeout { command, timeout });
            }
            None => std::thread::sleep(POLL_INTERVAL),
        }
    }
}
