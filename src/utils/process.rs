//! Subprocess execution with a wall-clock limit

use crate::utils::error::{ResolverError, ResolverResult};
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as AsyncCommand;
use tracing::warn;

/// Captured result of a finished process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `program` with `args`, capturing stdout and stderr as text
///
/// The child gets no stdin and is killed if the timeout fires or the returned
/// future is dropped before completion. A missing binary maps to
/// [`ResolverError::ToolNotInstalled`].
pub async fn run_with_timeout<P, I, S>(
    program: P,
    args: I,
    timeout: Duration,
) -> ResolverResult<ProcessOutput>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = AsyncCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ResolverError::ToolNotInstalled,
            _ => ResolverError::Io(e),
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            // Dropping the wait future drops the child, which kills it.
            warn!("Process exceeded {:?}, killed", timeout);
            return Err(ResolverError::Timeout(timeout));
        }
    };

    Ok(ProcessOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
