pub(crate) const SERIAL_TIMEOUT_MS: u64 = 50;
pub(crate) const RESPONSE_TIMEOUT_MS: u64 = 1000;
pub(crate) const MAX_RESPONSE_SIZE: usize = 1024;

pub(crate) const RESET_DTR_RTS_LOW_MS: u64 = 250;
pub(crate) const POST_RESET_BOOTUP_DELAY_MS: u64 = 100;
pub(crate) const SYNC_ATTEMPTS: usize = 5;

pub(crate) const CONFIG_FILE_NAME: &str = "avrprog.toml";
pub(crate) const CONFIG_ENV_VAR: &str = "AVRPROG_CONFIG";
pub(crate) const SYSTEM_CONFIG_DIRS: [&str; 2] = ["/etc", "/usr/local/etc"];

pub(crate) const DEFAULT_PROGNAME: &str = "avrprog";

/// Data bytes per record when writing Intel HEX
pub(crate) const HEX_RECORD_SIZE: usize = 16;
pub(crate) const MAX_IMAGE_SIZE: usize = 16 * 1024 * 1024;
