use crate::domain::model::{CartChange, CartLine, Product, ProductId};
use crate::domain::ports::Storage;
use crate::utils::error::{CartError, Result};
use std::collections::HashSet;
use tokio::sync::watch;

/// In-memory cart mirrored to a [`Storage`] key.
///
/// Every operation validates and commits in one `&mut self` call, so the
/// stock check and the write can never observe different cart states.
/// A committed add or update replaces the line's product snapshot with the
/// product it was checked against, keeping `quantity <= product.stock`.
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
    lines: Vec<CartLine>,
    changes: watch::Sender<Vec<CartLine>>,
}

impl<S: Storage> CartStore<S> {
    /// Reads the cart stored under `key`. Missing, unreadable or malformed
    /// data yields an empty cart.
    pub async fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = match storage.get(&key).await {
            Ok(Some(raw)) => match decode_lines(&key, &raw) {
                Ok(lines) => sanitize(lines),
                Err(e) => {
                    tracing::warn!("Discarding persisted cart: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                tracing::debug!("No persisted cart under '{}', starting empty", key);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Could not read persisted cart '{}': {}", key, e);
                Vec::new()
            }
        };

        tracing::info!("Loaded cart '{}' with {} line(s)", key, lines.len());
        let (changes, _) = watch::channel(lines.clone());

        Self {
            storage,
            key,
            lines,
            changes,
        }
    }

    pub async fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<CartChange> {
        ensure_positive(quantity)?;

        let new_quantity = match self.position(product.id) {
            Some(index) => {
                let existing = self.lines[index].quantity;
                let requested = u64::from(existing) + u64::from(quantity);
                if requested > u64::from(product.stock) {
                    return Err(stock_exceeded(product, requested));
                }
                // Bounded by `product.stock`, so the narrowing is lossless.
                let new_quantity = requested as u32;
                self.lines[index] = CartLine {
                    product: product.clone(),
                    quantity: new_quantity,
                };
                new_quantity
            }
            None => {
                if quantity > product.stock {
                    return Err(stock_exceeded(product, u64::from(quantity)));
                }
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity,
                });
                quantity
            }
        };

        tracing::debug!("Product {} now at quantity {}", product.id, new_quantity);
        self.commit().await;
        Ok(CartChange::Added {
            product_id: product.id,
            quantity: new_quantity,
        })
    }

    pub async fn update_quantity(&mut self, product: &Product, quantity: u32) -> Result<CartChange> {
        ensure_positive(quantity)?;
        if quantity > product.stock {
            return Err(stock_exceeded(product, u64::from(quantity)));
        }

        let index = self
            .position(product.id)
            .ok_or(CartError::LineNotFound {
                product_id: product.id,
            })?;
        self.lines[index] = CartLine {
            product: product.clone(),
            quantity,
        };

        tracing::debug!("Product {} set to quantity {}", product.id, quantity);
        self.commit().await;
        Ok(CartChange::Updated {
            product_id: product.id,
            quantity,
        })
    }

    /// Removing an absent product leaves the cart and storage untouched.
    pub async fn remove_from_cart(&mut self, product_id: ProductId) -> CartChange {
        let was_present = match self.position(product_id) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        };

        if was_present {
            tracing::debug!("Product {} removed from cart", product_id);
            self.commit().await;
        }

        CartChange::Removed {
            product_id,
            was_present,
        }
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Receives the full line list after every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.changes.subscribe()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }

    /// Persisting is best effort: a failed write is logged and the in-memory
    /// cart stays authoritative.
    async fn commit(&mut self) {
        if let Err(e) = self.persist().await {
            tracing::warn!(
                "Could not persist cart '{}': {} (Category: {:?})",
                self.key,
                e,
                e.category()
            );
        }
        self.changes.send_replace(self.lines.clone());
    }

    async fn persist(&self) -> Result<()> {
        let encoded = serde_json::to_string(&self.lines)?;
        self.storage.set(&self.key, &encoded).await
    }
}

fn decode_lines(key: &str, raw: &str) -> Result<Vec<CartLine>> {
    serde_json::from_str(raw).map_err(|source| CartError::MalformedPersistedState {
        key: key.to_string(),
        source,
    })
}

/// Drops stored lines that break the cart invariants; the first line per product wins.
fn sanitize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| {
            let valid = line.quantity >= 1
                && line.quantity <= line.product.stock
                && seen.insert(line.product.id);
            if !valid {
                tracing::warn!(
                    "Dropping persisted line for product {} (quantity {})",
                    line.product.id,
                    line.quantity
                );
            }
            valid
        })
        .collect()
}

fn ensure_positive(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(CartError::InvalidQuantityInput {
            input: quantity.to_string(),
            reason: "quantity must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn stock_exceeded(product: &Product, requested: u64) -> CartError {
    CartError::StockExceeded {
        product_id: product.id,
        requested,
        available: product.stock,
    }
}
