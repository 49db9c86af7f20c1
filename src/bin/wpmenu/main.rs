//! wpmenu entrypoint.
//!
//! Without flags this opens the main menu in rofi; `--menu` jumps straight to the sink
//! or source list and `--list` prints devices without any picker.

mod cli_utils;

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use wpmenu::config::AppConfig;
use wpmenu::doctor::doctor_report;
use wpmenu::picker::Rofi;
use wpmenu::telemetry::init_tracing;
use wpmenu::wpctl::Wpctl;
use wpmenu::{init_logging, log_debug, log_file_path, Controller, Menu};

use crate::cli_utils::print_device_list;

/// Exit code for configuration and runtime failures.
const ERROR_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            log_debug(&format!("fatal: {err:#}"));
            eprintln!("wpmenu: {err:#}");
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

fn run() -> Result<u8> {
    let mut config = AppConfig::parse();
    if config.doctor {
        println!("{}", doctor_report(&config).render());
        return Ok(0);
    }

    config.validate()?;
    init_logging(&config);
    let trace_file = init_tracing(&config);
    log_debug("=== wpmenu started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));
    if let Some(path) = trace_file {
        log_debug(&format!("Trace file: {path:?}"));
    }

    let audio = Wpctl::new(config.status_cmd.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(section) = config.list {
        let status = print_device_list(&audio, section, config.json, &mut out)?;
        out.flush()?;
        return Ok(status.code());
    }

    let picker = Rofi::new(config.picker_config());
    let start = config.menu.map(Menu::Devices).unwrap_or(Menu::Main);
    let status = Controller::new(&audio, &picker)
        .dry_run(config.dry_run)
        .run(start, &mut out)?;
    out.flush()?;
    Ok(status.code())
}
