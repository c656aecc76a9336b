use crate::config::Settings;
use crate::domain::catalog::Catalog;
use crate::domain::model::Product;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Catalog file, optionally carrying storage and notification settings.
///
/// ```toml
/// [storage]
/// dir = "${HOME}/.cart"
///
/// [notification]
/// ttl_ms = 3000
///
/// [[products]]
/// id = 1
/// name = "Pizza"
/// price = 30
/// stock = 5
/// image = "images/pizza.jpg"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub storage: Option<StorageConfig>,
    pub notification: Option<NotificationConfig>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub ttl_ms: Option<u64>,
}

impl CatalogFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Falls back to the built-in menu when the file lists no products.
    pub fn catalog(&self) -> Result<Catalog> {
        if self.products.is_empty() {
            tracing::debug!("Catalog file lists no products, using the default menu");
            return Ok(Catalog::default_menu());
        }
        Catalog::new(self.products.clone())
    }

    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        let storage = self.storage.clone().unwrap_or_default();
        let ttl_ms = self.notification.as_ref().and_then(|n| n.ttl_ms);

        Settings {
            storage_dir: storage.dir.unwrap_or(defaults.storage_dir),
            storage_key: storage.key.unwrap_or(defaults.storage_key),
            notification_ttl: ttl_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.notification_ttl),
        }
    }
}

impl Validate for CatalogFile {
    fn validate(&self) -> Result<()> {
        self.settings().validate()?;
        self.catalog()?;
        Ok(())
    }
}
