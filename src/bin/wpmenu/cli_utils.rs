use anyhow::Result;
use std::io::Write;
use wpmenu::status::{list_devices, DeviceList};
use wpmenu::wpctl::AudioControl;
use wpmenu::{ExitStatus, Section};

/// Print one section's devices for scripts and status bars.
pub(crate) fn print_device_list(
    audio: &dyn AudioControl,
    section: Section,
    json: bool,
    out: &mut dyn Write,
) -> Result<ExitStatus> {
    let devices = list_devices(audio, section)?;
    if json {
        writeln!(out, "{}", render_json(&devices)?)?;
    } else if devices.is_empty() {
        writeln!(out, "No {} available.", section.plural())?;
    } else {
        for (device, label) in devices.devices().iter().zip(devices.labels()) {
            writeln!(out, "{}\t{label}", device.id)?;
        }
    }
    if devices.is_empty() {
        Ok(ExitStatus::NothingAvailable)
    } else {
        Ok(ExitStatus::Done)
    }
}

pub(crate) fn render_json(devices: &DeviceList) -> Result<String> {
    Ok(serde_json::to_string(devices.devices())?)
}
