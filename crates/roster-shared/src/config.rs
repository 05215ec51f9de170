//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub admin: AdminSettings,
    pub pacing: PacingSettings,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub participants_key: String,
    pub config_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminSettings {
    pub passcode: String,
}

/// Artificial pauses around registration and the admin gate, in milliseconds.
#[derive(Debug, Deserialize, Clone)]
pub struct PacingSettings {
    pub registration_ms: u64,
    pub gate_check_ms: u64,
    pub gate_granted_ms: u64,
    pub gate_denied_ms: u64,
}

impl PacingSettings {
    pub fn registration(&self) -> Duration {
        Duration::from_millis(self.registration_ms)
    }

    pub fn gate_check(&self) -> Duration {
        Duration::from_millis(self.gate_check_ms)
    }

    pub fn gate_granted(&self) -> Duration {
        Duration::from_millis(self.gate_granted_ms)
    }

    pub fn gate_denied(&self) -> Duration {
        Duration::from_millis(self.gate_denied_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    pub file_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub dir: PathBuf,
    pub level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("ROSTER").separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }

    /// Builder preloaded with every default, before any file or environment source.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("storage.data_dir", constants::DEFAULT_DATA_DIR)?
            .set_default("storage.participants_key", constants::PARTICIPANTS_KEY)?
            .set_default("storage.config_key", constants::CONFIG_KEY)?
            .set_default("admin.passcode", constants::DEFAULT_ADMIN_PASSCODE)?
            .set_default("pacing.registration_ms", constants::REGISTRATION_PAUSE_MS as i64)?
            .set_default("pacing.gate_check_ms", constants::GATE_CHECK_PAUSE_MS as i64)?
            .set_default("pacing.gate_granted_ms", constants::GATE_GRANTED_PAUSE_MS as i64)?
            .set_default("pacing.gate_denied_ms", constants::GATE_DENIED_PAUSE_MS as i64)?
            .set_default("export.file_name", constants::DEFAULT_EXPORT_FILE)?
            .set_default("logging.dir", "logs")?
            .set_default("logging.level", "info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.admin.passcode, "NOVA2025");
        assert_eq!(config.storage.participants_key, "nova_students");
        assert_eq!(config.storage.config_key, "nova_config");
        assert_eq!(config.pacing.registration(), Duration::from_millis(1200));
        assert_eq!(config.export.file_name, "nova_group_results.csv");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let overrides = r#"
            [admin]
            passcode = "ORBIT"

            [pacing]
            registration_ms = 0
        "#;

        let config: AppConfig = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.admin.passcode, "ORBIT");
        assert_eq!(config.pacing.registration(), Duration::ZERO);
        assert_eq!(config.pacing.gate_check_ms, 1500);
    }
}
