use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

const DEFAULT_LOCATION: u8 = 3;
const MAX_LOCATION: u8 = 8;
const DEFAULT_THEME_STR: &str =
    "window {width: 24%; height: 30%; x-offset: -10px; y-offset: 10px; border-radius: 15px;}";
const DEFAULT_ACCEPT_BINDING: &str = "MousePrimary";

/// Window placement and mouse behavior for the picker.
///
/// Defaults open a small rounded window in the top-right corner that selects on hover
/// and accepts on a primary click. A YAML file may override any subset of fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerStyle {
    /// rofi `-location` anchor (0 = center, 1..=8 clockwise from top-left).
    pub location: u8,
    /// Inline theme passed via `-theme-str`; empty skips the flag.
    pub theme_str: String,
    pub hover_select: bool,
    /// Mouse binding for `-me-select-entry`; empty clears rofi's default.
    pub select_entry_binding: String,
    pub accept_entry_binding: String,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION,
            theme_str: DEFAULT_THEME_STR.to_string(),
            hover_select: true,
            select_entry_binding: String::new(),
            accept_entry_binding: DEFAULT_ACCEPT_BINDING.to_string(),
        }
    }
}

impl PickerStyle {
    /// Read overrides from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read picker style '{}'", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("invalid picker style '{}'", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        // An empty document means "all defaults".
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let style: Self = serde_yaml::from_str(raw)?;
        style.validate()?;
        Ok(style)
    }

    fn validate(&self) -> Result<()> {
        if self.location > MAX_LOCATION {
            bail!(
                "location must be between 0 and {MAX_LOCATION}, got {}",
                self.location
            );
        }
        if self.accept_entry_binding.trim().is_empty() {
            bail!("accept_entry_binding cannot be empty");
        }
        Ok(())
    }
}
