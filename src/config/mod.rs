//! Command-line parsing and validation helpers.

mod defaults;
mod validation;

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::picker::{PickerConfig, PickerStyle};
use crate::status::Section;
pub use defaults::{
    DEFAULT_PICKER_CMD, DEFAULT_STATUS_CMD, MAX_PICKER_ARGS, MAX_PICKER_ARG_BYTES,
};

/// CLI options for wpmenu. With no arguments the interactive menu starts at the top level.
#[derive(Debug, Parser, Clone)]
#[command(
    about = "wpmenu - pick the default PipeWire sink or source from a rofi menu",
    author,
    version
)]
pub struct AppConfig {
    /// Audio control CLI used for `status` and `set-default`
    #[arg(long, env = "WPMENU_STATUS_CMD", default_value = DEFAULT_STATUS_CMD)]
    pub status_cmd: String,

    /// Picker binary, optionally followed by extra arguments (shell-style quoting)
    #[arg(long, env = "WPMENU_PICKER_CMD", default_value = DEFAULT_PICKER_CMD)]
    pub picker_cmd: String,

    /// Extra argument passed to the picker before the prompt (repeatable)
    #[arg(
        long = "picker-arg",
        action = ArgAction::Append,
        value_name = "ARG",
        allow_hyphen_values = true
    )]
    pub picker_args: Vec<String>,

    /// YAML file overriding the picker window style
    #[arg(long = "picker-style", env = "WPMENU_PICKER_STYLE", value_name = "PATH")]
    pub picker_style: Option<PathBuf>,

    /// Open a device menu directly instead of the main menu
    #[arg(long, value_enum, value_name = "SECTION")]
    pub menu: Option<Section>,

    /// Print the devices of a section and exit
    #[arg(long, value_enum, value_name = "SECTION")]
    pub list: Option<Section>,

    /// Print --list output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print the set-default command instead of running it
    #[arg(long = "dry-run", default_value_t = false)]
    pub dry_run: bool,

    /// Print environment diagnostics and exit
    #[arg(long = "doctor", default_value_t = false)]
    pub doctor: bool,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "WPMENU_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "WPMENU_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow device names and picker selections in the debug log
    #[arg(
        long = "log-content",
        env = "WPMENU_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,

    /// Style loaded from --picker-style during validation
    #[arg(skip)]
    pub resolved_style: PickerStyle,
}

impl AppConfig {
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }

    /// Snapshot the picker invocation for `Rofi`.
    pub fn picker_config(&self) -> PickerConfig {
        PickerConfig {
            command: self.picker_cmd.clone(),
            extra_args: self.picker_args.clone(),
            style: self.resolved_style.clone(),
        }
    }
}
