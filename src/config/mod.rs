#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::CatalogFile;

use crate::core::notification::DEFAULT_NOTIFICATION_TTL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_storage_key, Validate};
use std::time::Duration;

pub const DEFAULT_STORAGE_DIR: &str = "./.cart";
pub const DEFAULT_STORAGE_KEY: &str = "cart";
pub const MAX_NOTIFICATION_TTL_MS: u64 = 60_000;

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub storage_dir: String,
    pub storage_key: String,
    pub notification_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: DEFAULT_STORAGE_DIR.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

impl ConfigProvider for Settings {
    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn storage_dir(&self) -> &str {
        &self.storage_dir
    }

    fn notification_ttl(&self) -> Duration {
        self.notification_ttl
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("storage.dir", &self.storage_dir)?;
        validate_storage_key("storage.key", &self.storage_key)?;
        validate_range(
            "notification.ttl_ms",
            u64::try_from(self.notification_ttl.as_millis()).unwrap_or(u64::MAX),
            1,
            MAX_NOTIFICATION_TTL_MS,
        )?;
        Ok(())
    }
}
