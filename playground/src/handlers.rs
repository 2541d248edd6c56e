//! Command execution handlers
//!
//! `execute` runs a command through the guard, then hands it to the shell with
//! a bounded wait. Every outcome, including rejection, becomes an
//! [`ExecResult`].

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::guard::CommandGuard;
use crate::types::{Config, ExecError, ExecResult};

/// Gate and run a command, folding every failure into the result
pub async fn execute(guard: &CommandGuard, config: &Config, command: &str) -> ExecResult {
    if let Err(err) = guard.check_command(command) {
        tracing::warn!(command, "Rejected command");
        return err.into();
    }

    tracing::info!(command, "Running command");

    match run_command(&config.commands.shell, command, config.timeouts.exec_secs).await {
        Ok(result) => {
            tracing::debug!(command, exit_code = result.exit_code, "Command finished");
            result
        }
        Err(err @ ExecError::Timeout(_)) => {
            tracing::warn!(command, timeout_secs = config.timeouts.exec_secs, "Command timed out");
            err.into()
        }
        Err(err) => {
            tracing::error!(command, "Command failed to run: {}", err);
            err.into()
        }
    }
}

/// Run `command` through `<shell> -c` in the home directory
///
/// Output is only collected once the process exits. On timeout the child is
/// killed and whatever it printed is discarded. Dropping the returned future
/// early also kills the child, so run it on a task that outlives the request
/// if that is not wanted.
pub async fn run_command(
    shell: &str,
    command: &str,
    timeout_secs: u64,
) -> Result<ExecResult, ExecError> {
    let working_dir = dirs::home_dir().ok_or(ExecError::HomeDirUnavailable)?;

    let mut cmd = Command::new(shell);
    cmd.arg("-c")
        .arg(command)
        .current_dir(&working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let timeout = Duration::from_secs(timeout_secs);
    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(result) => result?,
        // The output future is dropped here; kill_on_drop kills the shell.
        Err(_elapsed) => return Err(ExecError::Timeout(timeout_secs)),
    };

    Ok(ExecResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: exit_code(output.status),
    })
}

/// Real exit status, or the negated signal number for signalled children
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    1
}
