//! Application-wide constants

pub const DEFAULT_ADMIN_PASSCODE: &str = "NOVA2025";

pub const PARTICIPANTS_KEY: &str = "nova_students";
pub const CONFIG_KEY: &str = "nova_config";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_EXPORT_FILE: &str = "nova_group_results.csv";

pub const DEFAULT_EXPECTED_PARTICIPANTS: u32 = 50;
pub const DEFAULT_TARGET_GROUP_SIZE: u32 = 10;

// Dashboard slider bounds
pub const MIN_EXPECTED_PARTICIPANTS: u32 = 10;
pub const MAX_EXPECTED_PARTICIPANTS: u32 = 500;
pub const EXPECTED_PARTICIPANTS_STEP: u32 = 5;
pub const MIN_TARGET_GROUP_SIZE: u32 = 2;
pub const MAX_TARGET_GROUP_SIZE: u32 = 20;

// Pacing delays (milliseconds)
pub const REGISTRATION_PAUSE_MS: u64 = 1200;
pub const GATE_CHECK_PAUSE_MS: u64 = 1500;
pub const GATE_GRANTED_PAUSE_MS: u64 = 1000;
pub const GATE_DENIED_PAUSE_MS: u64 = 2000;

