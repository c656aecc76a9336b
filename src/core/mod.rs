pub mod cart_store;
pub mod notification;
pub mod storefront;

pub use crate::domain::model::{CartChange, CartLine, Notification, Product, ProductId, Severity};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
