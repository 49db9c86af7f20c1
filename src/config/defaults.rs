pub const DEFAULT_STATUS_CMD: &str = "wpctl";
pub const DEFAULT_PICKER_CMD: &str = "rofi";

pub(super) const STATUS_CMD_ALLOWLIST: &[&str] = &["wpctl"];
pub(super) const PICKER_CMD_ALLOWLIST: &[&str] = &["rofi"];

/// Keep the picker argv small.
pub const MAX_PICKER_ARGS: usize = 32;
pub const MAX_PICKER_ARG_BYTES: usize = 4096;
