use crate::config::{CatalogFile, Settings};
use crate::domain::catalog::Catalog;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cart-widget")]
#[command(about = "Interactive shopping cart over a fixed product catalog")]
pub struct CliConfig {
    /// Directory holding the persisted cart
    #[arg(long)]
    pub storage_dir: Option<String>,

    /// Key the cart is stored under
    #[arg(long)]
    pub storage_key: Option<String>,

    /// How long a notification stays visible, in milliseconds
    #[arg(long)]
    pub notification_ttl_ms: Option<u64>,

    /// TOML file with the product catalog and optional settings
    #[arg(long)]
    pub catalog: Option<String>,

    /// Keep the cart in memory only
    #[arg(long)]
    pub in_memory: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_catalog_file(&self) -> Result<Option<CatalogFile>> {
        self.catalog
            .as_deref()
            .map(CatalogFile::from_file)
            .transpose()
    }

    /// Flags win over the catalog file, which wins over the built-in defaults.
    pub fn resolve(&self, file: Option<&CatalogFile>) -> Result<(Catalog, Settings)> {
        let (catalog, base) = match file {
            Some(file) => (file.catalog()?, file.settings()),
            None => (Catalog::default_menu(), Settings::default()),
        };

        let settings = Settings {
            storage_dir: self.storage_dir.clone().unwrap_or(base.storage_dir),
            storage_key: self.storage_key.clone().unwrap_or(base.storage_key),
            notification_ttl: self
                .notification_ttl_ms
                .map(Duration::from_millis)
                .unwrap_or(base.notification_ttl),
        };
        settings.validate()?;

        Ok((catalog, settings))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.storage_dir {
            validate_path("storage_dir", dir)?;
        }
        if let Some(path) = &self.catalog {
            validate_path("catalog", path)?;
        }
        if let Some(ttl) = self.notification_ttl_ms {
            validate_positive_number("notification_ttl_ms", ttl, 1)?;
        }
        Ok(())
    }
}
