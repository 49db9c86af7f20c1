//! Interactive selection through an external dmenu-style picker.

mod style;

pub use style::PickerStyle;

use crate::{log_debug, log_debug_content};
use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    process::{Command, Stdio},
};

/// Shows a list of entries and returns the chosen one.
pub trait Picker {
    /// Returns the selected line, trimmed. An empty string means the user cancelled.
    fn pick(&self, items: &[String], prompt: &str) -> Result<String>;
}

/// Resolved picker invocation: binary, extra arguments and styling.
#[derive(Debug, Clone, Default)]
pub struct PickerConfig {
    pub command: String,
    pub extra_args: Vec<String>,
    pub style: PickerStyle,
}

/// `rofi -dmenu` driven over stdin/stdout.
#[derive(Debug, Clone)]
pub struct Rofi {
    config: PickerConfig,
}

impl Rofi {
    pub fn new(config: PickerConfig) -> Self {
        Self { config }
    }

    pub fn command(&self) -> &str {
        &self.config.command
    }

    /// Full argument vector for one invocation.
    pub fn args(&self, prompt: &str) -> Vec<String> {
        let style = &self.config.style;
        let mut args = vec![
            "-dmenu".to_string(),
            "-location".to_string(),
            style.location.to_string(),
        ];
        if !style.theme_str.is_empty() {
            args.push("-theme-str".to_string());
            args.push(style.theme_str.clone());
        }
        if style.hover_select {
            args.push("-hover-select".to_string());
        }
        args.push("-me-select-entry".to_string());
        args.push(style.select_entry_binding.clone());
        args.push("-me-accept-entry".to_string());
        args.push(style.accept_entry_binding.clone());
        args.extend(self.config.extra_args.iter().cloned());
        args.push("-p".to_string());
        args.push(prompt.to_string());
        args
    }
}

impl Picker for Rofi {
    fn pick(&self, items: &[String], prompt: &str) -> Result<String> {
        let command = &self.config.command;
        tracing::debug!(command = %command, prompt, items = items.len(), "opening picker");
        let mut child = Command::new(command)
            .args(self.args(prompt))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn picker `{command}`"))?;

        if let Some(mut stdin) = child.stdin.take() {
            write_items(&mut stdin, items)
                .with_context(|| format!("failed to write entries to `{command}`"))?;
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for picker `{command}`"))?;
        if !output.status.success() {
            log_debug(&format!(
                "picker exited with {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        let selection = String::from_utf8_lossy(&output.stdout).trim().to_string();
        log_debug_content(&format!("picker selection: {selection:?}"));
        Ok(selection)
    }
}

/// Write newline-joined entries. The stream is closed when the writer is dropped.
pub(crate) fn write_items<W: Write>(writer: &mut W, items: &[String]) -> io::Result<()> {
    match writer
        .write_all(items.join("\n").as_bytes())
        .and_then(|_| writer.flush())
    {
        // The picker may exit before reading everything.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            log_debug("picker closed stdin early");
            Ok(())
        }
        other => other,
    }
}
