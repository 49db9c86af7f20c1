use crate::config::AppConfig;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::UtcTime;

static TRACING_INIT: OnceLock<Option<PathBuf>> = OnceLock::new();

pub fn tracing_log_path() -> PathBuf {
    env::var("WPMENU_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("wpmenu_trace.jsonl"))
}

/// Trace file for this run, or `None` when `--no-logs` wins or `--logs` is absent.
pub fn trace_target(config: &AppConfig) -> Option<PathBuf> {
    config.logging_enabled().then(tracing_log_path)
}

/// Install the JSON trace subscriber once per process and record how the menu
/// was launched. Returns the trace file in use.
pub fn init_tracing(config: &AppConfig) -> Option<PathBuf> {
    let path = trace_target(config)?;
    TRACING_INIT
        .get_or_init(|| {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()?;
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok()?;
            tracing::info!(
                status_cmd = %config.status_cmd,
                picker_cmd = %config.picker_cmd,
                menu = ?config.menu,
                list = ?config.list,
                dry_run = config.dry_run,
                "wpmenu session started"
            );
            Some(path)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn no_logs_overrides_logs_for_tracing() {
        let cfg = AppConfig::parse_from(["test-app", "--logs", "--no-logs"]);
        assert_eq!(trace_target(&cfg), None);
        assert_eq!(init_tracing(&cfg), None);
    }

    #[test]
    fn logs_flag_selects_trace_file() {
        let cfg = AppConfig::parse_from(["test-app", "--logs"]);
        if cfg.no_logs {
            // WPMENU_NO_LOGS is set in this environment.
            return;
        }
        assert_eq!(trace_target(&cfg), Some(tracing_log_path()));
    }
}
