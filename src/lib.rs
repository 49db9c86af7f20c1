//! Pick the default PipeWire sink or source from a rofi menu.
//!
//! `wpctl status` is scraped for devices, the list is shown in the picker, and the
//! choice is applied with `wpctl set-default`.

mod app;
pub mod config;
pub mod controller;
pub mod doctor;
pub mod picker;
pub mod status;
pub mod telemetry;
pub mod wpctl;

pub use app::{init_logging, log_debug, log_debug_content, log_file_path};
pub use controller::{Controller, ExitStatus, Menu};
pub use status::{Device, DeviceList, Section, SelectionError};
