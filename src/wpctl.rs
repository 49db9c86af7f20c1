//! Audio server control through the `wpctl` CLI.

use crate::log_debug;
use anyhow::{Context, Result};
use std::{
    fmt, io,
    process::{Command, Output, Stdio},
};

/// Operations the menu needs from the audio server.
pub trait AudioControl {
    /// Full text of the status report.
    fn status(&self) -> Result<String>;

    /// Make `id` the default sink or source.
    fn set_default(&self, id: &str) -> Result<()>;

    /// Argument vector `set_default` would run, for dry runs and diagnostics.
    fn setter_command(&self, id: &str) -> Vec<String>;
}

/// Failure of an external command.
#[derive(Debug)]
pub enum CommandError {
    Spawn {
        command: String,
        source: io::Error,
    },
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Spawn { command, source } => {
                write!(f, "failed to spawn `{command}`: {source}")
            }
            CommandError::Failed {
                command,
                code,
                stderr,
            } => {
                let code = code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                if stderr.is_empty() {
                    write!(f, "`{command}` exited with code {code}")
                } else {
                    write!(f, "`{command}` exited with code {code}: {stderr}")
                }
            }
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Spawn { source, .. } => Some(source),
            CommandError::Failed { .. } => None,
        }
    }
}

/// Runs `<command> status` and `<command> set-default <id>` without a shell.
#[derive(Debug, Clone)]
pub struct Wpctl {
    command: String,
}

impl Wpctl {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn run(&self, args: &[&str]) -> Result<Output, CommandError> {
        let rendered = format!("{} {}", self.command, args.join(" "));
        tracing::debug!(command = %rendered, "running audio control command");
        log_debug(&format!("exec: {rendered}"));
        let output = Command::new(&self.command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: rendered.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(CommandError::Failed {
                command: rendered,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl AudioControl for Wpctl {
    fn status(&self) -> Result<String> {
        let output = self
            .run(&["status"])
            .context("failed to read audio server status")?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn set_default(&self, id: &str) -> Result<()> {
        self.run(&["set-default", id])
            .with_context(|| format!("failed to set default device {id}"))?;
        Ok(())
    }

    fn setter_command(&self, id: &str) -> Vec<String> {
        vec![self.command.clone(), "set-default".to_string(), id.to_string()]
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn status_captures_stdout() {
        let wpctl = Wpctl::new("echo");
        let text = wpctl.status().expect("echo runs");
        assert_eq!(text, "status\n");
    }

    #[test]
    fn non_zero_exit_is_command_error() {
        let wpctl = Wpctl::new("false");
        let err = wpctl.status().unwrap_err();
        let command_err = err
            .downcast_ref::<CommandError>()
            .expect("command error kept in chain");
        assert!(matches!(
            command_err,
            CommandError::Failed { code: Some(1), .. }
        ));
    }

    #[test]
    fn failed_command_names_the_full_invocation() {
        let wpctl = Wpctl::new("false");
        let err = wpctl.set_default("51").unwrap_err();
        match err.downcast_ref::<CommandError>() {
            Some(CommandError::Failed { command, .. }) => {
                assert_eq!(command, "false set-default 51")
            }
            other => panic!("expected a failed command, got {other:?}"),
        }
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let wpctl = Wpctl::new("/nonexistent/wpmenu-test-binary");
        let err = wpctl.set_default("46").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::Spawn { .. })
        ));
        assert!(format!("{err:#}").contains("failed to set default device 46"));
        assert!(format!("{err:#}")
            .contains("failed to spawn `/nonexistent/wpmenu-test-binary set-default 46`"));
    }

    #[test]
    fn set_default_passes_id_as_single_argument() {
        let wpctl = Wpctl::new("true");
        assert!(wpctl.set_default("46; rm -rf /").is_ok());
        assert_eq!(
            wpctl.setter_command("46"),
            vec!["true".to_string(), "set-default".to_string(), "46".to_string()]
        );
    }

    #[test]
    fn command_error_display_includes_stderr() {
        let err = CommandError::Failed {
            command: "wpctl status".to_string(),
            code: Some(2),
            stderr: "could not connect".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`wpctl status` exited with code 2: could not connect"
        );
    }
}
