//! Type definitions for the playground exec gate

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Configuration for the exec gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub commands: CommandConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Shell used to interpret command lines (`<shell> -c <cmd>`)
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Literal, case-sensitive prefixes a trimmed command must start with
    #[serde(default = "default_allowed_prefixes")]
    pub allowed_prefixes: Vec<String>,
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

fn default_allowed_prefixes() -> Vec<String> {
    vec![
        "uv ".to_string(),
        "which ".to_string(),
        "ls ".to_string(),
        "uname ".to_string(),
        "rm -rf /tmp/uv-playground-venv".to_string(),
    ]
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            allowed_prefixes: default_allowed_prefixes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Wall-clock limit for a single command, in seconds
    #[serde(default = "default_exec_timeout")]
    pub exec_secs: u64,
}

fn default_exec_timeout() -> u64 {
    30
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            exec_secs: default_exec_timeout(),
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Exit code reported when a command exceeds its deadline
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Outcome of one `/exec` call, returned verbatim to the browser
///
/// Every request produces one of these, including rejected and failed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecResult {
    /// A result with no stdout and the given stderr/exit code
    pub fn failure(stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Command not allowed.")]
    CommandNotAllowed,

    #[error("Command timed out.")]
    Timeout(u64),

    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<ExecError> for ExecResult {
    fn from(err: ExecError) -> Self {
        let exit_code = match err {
            ExecError::Timeout(_) => TIMEOUT_EXIT_CODE,
            _ => 1,
        };
        ExecResult::failure(err.to_string(), exit_code)
    }
}
