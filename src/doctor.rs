use crate::status::{parse_status, Section};
use crate::telemetry::tracing_log_path;
use crate::wpctl::{AudioControl, Wpctl};
use crate::{config::AppConfig, log_file_path};
use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
};

pub struct DoctorReport {
    lines: Vec<String>,
}

impl DoctorReport {
    pub fn new(title: &str) -> Self {
        Self {
            lines: vec![title.to_string()],
        }
    }

    pub fn section(&mut self, title: &str) {
        self.lines.push(String::new());
        self.lines.push(format!("{title}:"));
    }

    pub fn push_kv(&mut self, key: &str, value: impl Display) {
        self.lines.push(format!("  {key}: {value}"));
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Collect version, config, command, and device diagnostics.
pub fn doctor_report(config: &AppConfig) -> DoctorReport {
    let mut report = DoctorReport::new("wpmenu doctor");
    report.push_kv("version", env!("CARGO_PKG_VERSION"));
    report.push_kv("os", format!("{}/{}", env::consts::OS, env::consts::ARCH));

    let mut validated = config.clone();
    let validation_result = validated.validate();
    let resolved = validation_result
        .as_ref()
        .map(|_| &validated)
        .unwrap_or(config);

    report.section("Config");
    match &validation_result {
        Ok(()) => report.push_kv("validation", "ok"),
        Err(err) => report.push_kv("validation", format!("error: {err:#}")),
    }
    report.push_kv(
        "logs",
        if resolved.logging_enabled() {
            "enabled"
        } else {
            "disabled"
        },
    );
    report.push_kv("log_file", log_file_path().display());
    report.push_kv("trace_log", tracing_log_path().display());
    report.push_kv(
        "picker_style",
        resolved
            .picker_style
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
    );

    report.section("Commands");
    report.push_kv("status_cmd", &resolved.status_cmd);
    report.push_kv("status_path", describe_lookup(&resolved.status_cmd));
    report.push_kv("picker_cmd", &resolved.picker_cmd);
    report.push_kv("picker_path", describe_lookup(&resolved.picker_cmd));
    if !resolved.picker_args.is_empty() {
        report.push_kv("picker_args", resolved.picker_args.join(" "));
    }
    report.push_kv(
        "session_type",
        env::var("XDG_SESSION_TYPE").unwrap_or_else(|_| "unset".to_string()),
    );

    report.section("Devices");
    match Wpctl::new(resolved.status_cmd.clone()).status() {
        Ok(text) => {
            for section in [Section::Sinks, Section::Sources] {
                let devices = parse_status(&text, section);
                report.push_kv(section.plural(), devices.len());
                for label in devices.labels() {
                    report.push_line(format!("    - {label}"));
                }
            }
        }
        Err(err) => report.push_kv("status", format!("error: {err:#}")),
    }

    report
}

fn describe_lookup(command: &str) -> String {
    match find_executable(command) {
        Some(path) => path.display().to_string(),
        None => "not found".to_string(),
    }
}

/// Resolve a command the way `Command::new` would: paths as-is, bare names through `PATH`.
pub fn find_executable(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.is_absolute() || command.contains(std::path::MAIN_SEPARATOR) {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(command))
        .find(|path| path.is_file())
}
