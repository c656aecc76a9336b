use crate::core::cart_store::CartStore;
use crate::core::notification::NotificationController;
use crate::domain::catalog::Catalog;
use crate::domain::model::{CartChange, CartLine, Notification, ProductId, Severity};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{CartError, Result};
use crate::view::intent::{parse_command, Command, Intent};
use crate::view::render::render_page;
use tokio::sync::watch;

pub const ADDED_MESSAGE: &str = "Add to cart successfully";
pub const UPDATED_MESSAGE: &str = "Update successfully";
pub const DELETED_MESSAGE: &str = "Delete successfully";

/// Routes view intents into the cart store and reports every outcome,
/// accepted or rejected, through the notification controller.
pub struct Storefront<S: Storage> {
    catalog: Catalog,
    cart: CartStore<S>,
    notifications: NotificationController,
}

impl<S: Storage> Storefront<S> {
    pub async fn open<C: ConfigProvider>(catalog: Catalog, storage: S, config: &C) -> Self {
        let cart = CartStore::load(storage, config.storage_key()).await;
        Self {
            catalog,
            cart,
            notifications: NotificationController::new(config.notification_ttl()),
        }
    }

    pub async fn add_to_cart(&mut self, product_id: ProductId, quantity: u32) -> Result<CartChange> {
        let result = match self.catalog.find(product_id) {
            Some(product) => self.cart.add_to_cart(product, quantity).await,
            None => Err(CartError::ProductNotFound { product_id }),
        };
        self.report(result, ADDED_MESSAGE, Severity::Success)
    }

    pub async fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartChange> {
        let result = match self.catalog.find(product_id) {
            Some(product) => self.cart.update_quantity(product, quantity).await,
            None => Err(CartError::ProductNotFound { product_id }),
        };
        self.report(result, UPDATED_MESSAGE, Severity::Warning)
    }

    /// Works for lines whose product has since left the catalog.
    pub async fn remove_from_cart(&mut self, product_id: ProductId) -> CartChange {
        let change = self.cart.remove_from_cart(product_id).await;
        tracing::info!("Removed product {} from cart: {:?}", product_id, change);
        self.notifications.notify(DELETED_MESSAGE, Severity::Danger);
        change
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Result<CartChange> {
        match intent {
            Intent::Add {
                product_id,
                quantity,
            } => self.add_to_cart(product_id, quantity).await,
            Intent::Update {
                product_id,
                quantity: Some(quantity),
            } => self.update_quantity(product_id, quantity).await,
            Intent::Update {
                product_id,
                quantity: None,
            } => {
                let current = self.cart.line(product_id).map(|line| line.quantity);
                match current {
                    Some(quantity) => self.update_quantity(product_id, quantity).await,
                    None => self.reject(CartError::LineNotFound { product_id }),
                }
            }
            Intent::Remove { product_id } => Ok(self.remove_from_cart(product_id).await),
        }
    }

    /// Parses and runs one line of input. Input errors are reported through
    /// the notification slot like any other rejection.
    pub async fn handle_input(&mut self, line: &str) -> Result<Command> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => return self.reject(e),
        };

        if let Command::Intent(intent) = command {
            // Outcome already surfaced as a notification.
            let _ = self.dispatch(intent).await;
        }
        Ok(command)
    }

    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifications.current()
    }

    pub fn subscribe_cart(&self) -> watch::Receiver<Vec<CartLine>> {
        self.cart.subscribe()
    }

    pub fn subscribe_notifications(&self) -> watch::Receiver<Option<Notification>> {
        self.notifications.subscribe()
    }

    pub fn render(&self) -> String {
        let notification = self.notification();
        render_page(&self.catalog, self.cart.lines(), notification.as_ref())
    }

    fn report(
        &mut self,
        result: Result<CartChange>,
        success_message: &str,
        severity: Severity,
    ) -> Result<CartChange> {
        match result {
            Ok(change) => {
                tracing::info!("Cart updated for product {}: {:?}", change.product_id(), change);
                self.notifications.notify(success_message, severity);
                Ok(change)
            }
            Err(e) => self.reject(e),
        }
    }

    fn reject<T>(&mut self, error: CartError) -> Result<T> {
        tracing::info!("Cart operation rejected: {}", error);
        self.notifications
            .notify(error.user_friendly_message(), Severity::Danger);
        Err(error)
    }
}
