//! Parsing for `wpctl status` output.
//!
//! The status tool prints a tree of sections decorated with box-drawing glyphs.
//! Each device line looks like `│  *   46. Built-in Audio Analog Stereo [vol: 0.40]`,
//! where the leading `*` marks the current default.

#[cfg(test)]
mod tests;

use crate::wpctl::AudioControl;
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use strip_ansi_escapes::strip;

/// Prefix shown in front of the default device's label.
pub const DEFAULT_MARKER: &str = "-> ";

const DECORATION_GLYPHS: [char; 4] = ['├', '─', '│', '└'];
const VOLUME_ANNOTATION: &str = "[vol:";
const ID_DELIMITER: &str = ". ";
const MAX_LABEL_LEVEL: u8 = 2;

/// Block of the status output to read devices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Sinks,
    Sources,
}

impl Section {
    /// Header substring that opens the section in the status text.
    pub fn header(self) -> &'static str {
        match self {
            Section::Sinks => "Sinks:",
            Section::Sources => "Sources:",
        }
    }

    /// Singular noun used in user-facing messages.
    pub fn noun(self) -> &'static str {
        match self {
            Section::Sinks => "sink",
            Section::Sources => "source",
        }
    }

    /// Plural noun, also the `--list`/`--menu` value.
    pub fn plural(self) -> &'static str {
        match self {
            Section::Sinks => "sinks",
            Section::Sources => "sources",
        }
    }

    /// Picker prompt for this section's menu.
    pub fn prompt(self) -> &'static str {
        match self {
            Section::Sinks => "Select Sink:",
            Section::Sources => "Select Source:",
        }
    }
}

/// A sink or source as reported by the status tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "default")]
    pub is_default: bool,
}

/// Raised when a picker selection matches none of the listed devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    NotFound(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotFound(selection) => {
                write!(f, "selection '{selection}' does not match any listed device")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Devices of one section, in status-output order.
///
/// Labels are unique within a list: a name shared by several devices is shown as
/// `<name> (<id>)` for each of them, so every label resolves to exactly one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceList {
    devices: Vec<Device>,
    default_id: Option<String>,
}

impl DeviceList {
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_current_default(&self, device: &Device) -> bool {
        self.default_id.as_deref() == Some(device.id.as_str())
    }

    fn push(&mut self, device: Device) {
        if device.is_default {
            self.default_id = Some(device.id.clone());
        }
        self.devices.push(device);
    }

    /// Label for the device at `index`. Level 0 is the bare name, level 1 adds the
    /// id, level 2 adds the list position as well.
    fn label_at(&self, index: usize, level: u8) -> String {
        let device = &self.devices[index];
        let label = match level {
            0 => device.name.clone(),
            1 => format!("{} ({})", device.name, device.id),
            _ => format!("{} ({}) #{}", device.name, device.id, index + 1),
        };
        if device.is_default {
            format!("{DEFAULT_MARKER}{label}")
        } else {
            label
        }
    }

    /// Picker entries in list order, with the default device marked.
    ///
    /// Entries are unique: every member of a group of identical entries is
    /// re-labelled one level up until no group remains, so a suffixed name can
    /// never shadow another device whose real name looks the same.
    pub fn labels(&self) -> Vec<String> {
        let mut levels = vec![0u8; self.devices.len()];
        loop {
            let labels: Vec<String> = levels
                .iter()
                .enumerate()
                .map(|(index, level)| self.label_at(index, *level))
                .collect();
            let mut escalated = false;
            for (index, label) in labels.iter().enumerate() {
                let shared = labels.iter().filter(|other| *other == label).count() > 1;
                if shared && levels[index] < MAX_LABEL_LEVEL {
                    levels[index] += 1;
                    escalated = true;
                }
            }
            if !escalated {
                return labels;
            }
        }
    }

    /// Map a picker selection back to its device.
    ///
    /// Only entries produced by [`DeviceList::labels`] match. The default entry
    /// also matches without its marker.
    pub fn resolve(&self, selection: &str) -> Result<&Device, SelectionError> {
        let key = selection.trim();
        let labels = self.labels();
        let index = labels.iter().position(|label| label == key).or_else(|| {
            labels.iter().enumerate().position(|(index, label)| {
                self.devices[index].is_default
                    && label.strip_prefix(DEFAULT_MARKER) == Some(key)
            })
        });
        index
            .map(|index| &self.devices[index])
            .ok_or_else(|| SelectionError::NotFound(selection.to_string()))
    }
}

/// Run the status command and parse the requested section.
pub fn list_devices(control: &dyn AudioControl, section: Section) -> Result<DeviceList> {
    let text = control.status()?;
    let devices = parse_status(&text, section);
    tracing::debug!(
        section = section.plural(),
        count = devices.len(),
        "parsed status output"
    );
    Ok(devices)
}

/// Extract the devices listed under `section`. A missing section yields an empty list.
pub fn parse_status(text: &str, section: Section) -> DeviceList {
    let cleaned = strip_decoration(text);
    let mut lines = cleaned.lines();
    let mut list = DeviceList::default();

    if !lines.by_ref().any(|line| line.contains(section.header())) {
        return list;
    }

    for line in lines.take_while(|line| !line.trim().is_empty()) {
        if let Some(device) = parse_item(line.trim()) {
            list.push(device);
        }
    }
    list
}

/// Remove ANSI escapes and tree-drawing glyphs, keeping line structure intact.
pub fn strip_decoration(text: &str) -> String {
    let ansi_free = strip(text);
    String::from_utf8_lossy(&ansi_free)
        .chars()
        .filter(|ch| !DECORATION_GLYPHS.contains(ch))
        .collect()
}

/// Parse one `[*] <id>. <name> [vol: ...]` line; anything else is skipped.
fn parse_item(line: &str) -> Option<Device> {
    let clean = match line.find(VOLUME_ANNOTATION) {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    };
    let (id_part, name_part) = clean.split_once(ID_DELIMITER)?;
    let is_default = clean.starts_with('*');
    let id = id_part.trim_start_matches('*').trim();
    let name = name_part.trim();
    if id.is_empty() || name.is_empty() {
        return None;
    }
    Some(Device {
        id: id.to_string(),
        name: name.to_string(),
        is_default,
    })
}
