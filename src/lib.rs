pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, MemoryStorage};
pub use config::{CatalogFile, Settings};
pub use crate::core::{
    cart_store::CartStore, notification::NotificationController, storefront::Storefront,
};
pub use domain::catalog::Catalog;
pub use domain::model::{CartChange, CartLine, Notification, Product, ProductId, Severity};
pub use domain::ports::{ConfigProvider, Storage};
pub use utils::error::{CartError, Result};
