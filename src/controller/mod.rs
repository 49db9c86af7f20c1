//! Menu state machine: main menu, sink/source menus, and the set-default action.


use crate::picker::Picker;
use crate::status::{list_devices, Section};
use crate::wpctl::AudioControl;
use crate::{log_debug, log_debug_content};
use anyhow::Result;
use std::io::Write;

pub const MANAGE_SINKS: &str = "Manage Sinks";
pub const MANAGE_SOURCES: &str = "Manage Sources";
pub const BACK_TO_MAIN: &str = "Back to Main Menu";
pub const EXIT: &str = "Exit";
pub const MAIN_PROMPT: &str = "Select Option:";

/// Where the controller currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    Devices(Section),
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Completed, cancelled, or nothing to change.
    Done,
    /// The requested section listed no devices.
    NothingAvailable,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Done => 0,
            ExitStatus::NothingAvailable => 1,
        }
    }
}

enum Step {
    Goto(Menu),
    Exit(ExitStatus),
}

pub struct Controller<'a> {
    audio: &'a dyn AudioControl,
    picker: &'a dyn Picker,
    dry_run: bool,
}

impl<'a> Controller<'a> {
    pub fn new(audio: &'a dyn AudioControl, picker: &'a dyn Picker) -> Self {
        Self {
            audio,
            picker,
            dry_run: false,
        }
    }

    /// Report the setter command instead of running it.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Drive the menus from `start` until a terminal choice. User-facing messages go to `out`.
    pub fn run(&self, start: Menu, out: &mut dyn Write) -> Result<ExitStatus> {
        let mut menu = start;
        loop {
            log_debug(&format!("menu: {menu:?}"));
            let step = match menu {
                Menu::Main => self.main_menu()?,
                Menu::Devices(section) => self.device_menu(section, out)?,
            };
            match step {
                Step::Goto(next) => menu = next,
                Step::Exit(status) => {
                    log_debug(&format!("exit: {status:?}"));
                    return Ok(status);
                }
            }
        }
    }

    fn main_menu(&self) -> Result<Step> {
        let items = [MANAGE_SINKS, MANAGE_SOURCES, EXIT].map(String::from);
        let selection = self.picker.pick(&items, MAIN_PROMPT)?;
        Ok(match selection.as_str() {
            MANAGE_SINKS => Step::Goto(Menu::Devices(Section::Sinks)),
            MANAGE_SOURCES => Step::Goto(Menu::Devices(Section::Sources)),
            "" | EXIT => Step::Exit(ExitStatus::Done),
            // Custom input typed into the picker; ask again.
            _ => Step::Goto(Menu::Main),
        })
    }

    fn device_menu(&self, section: Section, out: &mut dyn Write) -> Result<Step> {
        let devices = list_devices(self.audio, section)?;
        if devices.is_empty() {
            writeln!(out, "No {} available.", section.plural())?;
            return Ok(Step::Exit(ExitStatus::NothingAvailable));
        }

        let mut items = devices.labels();
        items.push(BACK_TO_MAIN.to_string());
        items.push(EXIT.to_string());

        let selection = self.picker.pick(&items, section.prompt())?;
        match selection.as_str() {
            BACK_TO_MAIN => return Ok(Step::Goto(Menu::Main)),
            "" | EXIT => return Ok(Step::Exit(ExitStatus::Done)),
            _ => {}
        }

        let device = devices.resolve(&selection)?;
        log_debug_content(&format!("selected {} {}", section.noun(), device.name));
        if devices.is_current_default(device) {
            writeln!(
                out,
                "{} is already the default {}.",
                device.name,
                section.noun()
            )?;
            return Ok(Step::Exit(ExitStatus::Done));
        }

        if self.dry_run {
            writeln!(
                out,
                "Would run: {}",
                self.audio.setter_command(&device.id).join(" ")
            )?;
        } else {
            self.audio.set_default(&device.id)?;
            tracing::info!(section = section.noun(), id = %device.id, "default device changed");
        }
        Ok(Step::Exit(ExitStatus::Done))
    }
}
