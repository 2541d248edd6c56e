//! Command guard - allow-list gate for `/exec`
//!
//! A command is admitted when, after trimming surrounding whitespace, it
//! starts with one of the configured prefixes. Matching is literal and
//! case-sensitive, so `"uv "` requires the trailing space and rejects a bare
//! `uv`.
//!
//! This is advisory only. Admitted commands go to a full shell, so anything
//! chained after an allowed prefix (`;`, `&&`, `|`, backticks, `$(...)`) runs
//! too. The playground assumes a single trusted local user.

use crate::types::{Config, ExecError};

/// Prefix allow-list enforcement
#[derive(Debug, Clone)]
pub struct CommandGuard {
    allowed_prefixes: Vec<String>,
}

impl CommandGuard {
    /// Create a new CommandGuard from config
    pub fn new(config: &Config) -> Self {
        let allowed_prefixes = config
            .commands
            .allowed_prefixes
            .iter()
            .filter(|p| {
                if p.is_empty() {
                    tracing::warn!("Ignoring empty allow-list prefix");
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        Self { allowed_prefixes }
    }

    /// Whether `command` starts with an allowed prefix once trimmed
    pub fn is_allowed(&self, command: &str) -> bool {
        let command = command.trim();
        self.allowed_prefixes
            .iter()
            .any(|prefix| command.starts_with(prefix.as_str()))
    }

    /// Check if a command is allowed
    pub fn check_command(&self, command: &str) -> Result<(), ExecError> {
        if self.is_allowed(command) {
            Ok(())
        } else {
            Err(ExecError::CommandNotAllowed)
        }
    }

    pub fn allowed_prefixes(&self) -> &[String] {
        &self.allowed_prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> CommandGuard {
        CommandGuard::new(&Config::default())
    }

    #[test]
    fn test_allowed_prefixes_admit() {
        let guard = guard();

        assert!(guard.is_allowed("uv --version"));
        assert!(guard.is_allowed("uv venv /tmp/uv-playground-venv"));
        assert!(guard.is_allowed("which python3"));
        assert!(guard.is_allowed("ls /"));
        assert!(guard.is_allowed("uname -a"));
        assert!(guard.is_allowed("rm -rf /tmp/uv-playground-venv"));
        assert!(guard.check_command("ls -la").is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let guard = guard();

        assert!(guard.is_allowed("   uv pip list  "));
        assert!(guard.is_allowed("\n\tuname -r\n"));
    }

    #[test]
    fn test_empty_and_blank_rejected() {
        let guard = guard();

        assert!(!guard.is_allowed(""));
        assert!(!guard.is_allowed("   "));
        assert!(matches!(
            guard.check_command(""),
            Err(ExecError::CommandNotAllowed)
        ));
    }

    #[test]
    fn test_prefix_must_match_exactly() {
        let guard = guard();

        // Trailing space is part of the prefix
        assert!(!guard.is_allowed("uv"));
        assert!(!guard.is_allowed("  uv  "));
        assert!(!guard.is_allowed("uvx ruff"));
        assert!(!guard.is_allowed("ls"));
        // Case-sensitive
        assert!(!guard.is_allowed("UV --version"));
        assert!(!guard.is_allowed("Ls /"));
        // Whitespace inside the prefix is not normalized
        assert!(!guard.is_allowed("rm  -rf /tmp/uv-playground-venv"));
        assert!(!guard.is_allowed("rm -rf /tmp"));
    }

    #[test]
    fn test_non_leading_substring_rejected() {
        let guard = guard();

        assert!(!guard.is_allowed("echo uv --version"));
        assert!(!guard.is_allowed("sudo ls /"));
        assert!(!guard.is_allowed("cat /etc/passwd; ls /"));
    }

    #[test]
    fn test_chaining_after_prefix_is_not_inspected() {
        // Known weakness: the shell sees the whole line.
        let guard = guard();

        assert!(guard.is_allowed("ls / && cat /etc/hostname"));
        assert!(guard.is_allowed("uname -a; id"));
        assert!(guard.is_allowed("ls /\nwhoami"));
    }

    #[test]
    fn test_custom_prefixes_drop_empty() {
        let mut config = Config::default();
        config.commands.allowed_prefixes = vec![String::new(), "echo ".to_string()];
        let guard = CommandGuard::new(&config);

        assert_eq!(guard.allowed_prefixes(), ["echo ".to_string()]);
        assert!(guard.is_allowed("echo hi"));
        assert!(!guard.is_allowed("ls /"));
        assert!(!guard.is_allowed(""));
    }
}
