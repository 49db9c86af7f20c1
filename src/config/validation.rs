use super::defaults::{
    MAX_PICKER_ARGS, MAX_PICKER_ARG_BYTES, PICKER_CMD_ALLOWLIST, STATUS_CMD_ALLOWLIST,
};
use super::AppConfig;
use crate::picker::PickerStyle;
use anyhow::{anyhow, bail, Context, Result};
use std::{fs, path::Path};

impl AppConfig {
    /// Check flag combinations, resolve binaries, and load the picker style.
    pub fn validate(&mut self) -> Result<()> {
        if self.json && self.list.is_none() {
            bail!("--json only applies to --list");
        }
        if self.menu.is_some() && self.list.is_some() {
            bail!("--menu cannot be combined with --list");
        }

        self.status_cmd =
            sanitize_binary(&self.status_cmd, "--status-cmd", STATUS_CMD_ALLOWLIST)?;

        // `--picker-cmd "rofi -i"` carries its own arguments ahead of --picker-arg values.
        let (picker, mut embedded_args) = split_command(&self.picker_cmd);
        self.picker_cmd = sanitize_binary(&picker, "--picker-cmd", PICKER_CMD_ALLOWLIST)?;
        if !embedded_args.is_empty() {
            embedded_args.append(&mut self.picker_args);
            self.picker_args = embedded_args;
        }

        if self.picker_args.len() > MAX_PICKER_ARGS {
            bail!(
                "too many picker arguments (max {MAX_PICKER_ARGS}, got {})",
                self.picker_args.len()
            );
        }
        let total_arg_bytes: usize = self.picker_args.iter().map(|arg| arg.len()).sum();
        if total_arg_bytes > MAX_PICKER_ARG_BYTES {
            bail!("combined picker argument length exceeds {MAX_PICKER_ARG_BYTES} bytes");
        }
        if self.picker_args.iter().any(|arg| arg == "-p") {
            bail!("the picker prompt is set per menu; drop -p from the picker arguments");
        }

        if let Some(path) = &self.picker_style {
            self.resolved_style = PickerStyle::load(path)?;
        }

        Ok(())
    }
}

/// Split a command line into binary and arguments, honoring shell-style quotes.
pub(super) fn split_command(raw: &str) -> (String, Vec<String>) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (String::new(), Vec::new());
    }
    let parts = shell_words::split(trimmed)
        .unwrap_or_else(|_| trimmed.split_whitespace().map(|s| s.to_string()).collect());
    match parts.split_first() {
        Some((command, args)) => (command.clone(), args.to_vec()),
        None => (String::new(), Vec::new()),
    }
}

/// Allow either a known binary name or an absolute path to an executable file.
pub(super) fn sanitize_binary(value: &str, flag: &str, allowlist: &[&str]) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{flag} cannot be empty");
    }
    if let Some(allowed) = allowlist
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
    {
        return Ok((*allowed).to_string());
    }

    let path = Path::new(trimmed);
    if path.is_absolute() || trimmed.contains(std::path::MAIN_SEPARATOR) {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("failed to canonicalize {flag} '{trimmed}'"))?;
        let metadata = fs::metadata(&canonical)
            .with_context(|| format!("failed to inspect {flag} '{}'", canonical.display()))?;
        if !metadata.is_file() {
            bail!("{flag} '{}' is not a file", canonical.display());
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = metadata.permissions().mode();
            if mode & 0o111 == 0 {
                bail!(
                    "{flag} '{}' exists but is not executable (mode {:o})",
                    canonical.display(),
                    mode
                );
            }
        }
        return canonical
            .to_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("{flag} must be valid UTF-8"));
    }

    bail!("{flag} must be one of {allowlist:?} or an existing binary path");
}
