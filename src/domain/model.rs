use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ProductId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    /// Maximum quantity purchasable across the whole cart.
    #[serde(alias = "quantity")]
    pub stock: u32,
    /// Opaque asset reference, resolved by whatever renders it.
    pub image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        stock: u32,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            image: image.into(),
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// One entry per distinct product. The product is a snapshot taken when the
/// line was created; later catalog changes do not flow into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Monotonic per controller; ties an expiry timer to the message it was armed for.
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// A committed cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added { product_id: ProductId, quantity: u32 },
    Updated { product_id: ProductId, quantity: u32 },
    Removed { product_id: ProductId, was_present: bool },
}

impl CartChange {
    pub fn product_id(&self) -> ProductId {
        match self {
            CartChange::Added { product_id, .. }
            | CartChange::Updated { product_id, .. }
            | CartChange::Removed { product_id, .. } => *product_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_line_wire_format() {
        let line = CartLine {
            product: Product::new(1, "Pizza", 30.0, 5, "images/pizza.jpg"),
            quantity: 3,
        };

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "product": {
                    "id": 1,
                    "name": "Pizza",
                    "price": 30.0,
                    "stock": 5,
                    "image": "images/pizza.jpg"
                },
                "quantity": 3
            })
        );
    }

    #[test]
    fn test_legacy_quantity_key_is_read_as_stock() {
        let raw = r#"{"product":{"id":3,"name":"Bread","price":20,"quantity":10,"image":"bread.jpg"},"quantity":2}"#;
        let line: CartLine = serde_json::from_str(raw).unwrap();
        assert_eq!(line.product.stock, 10);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.subtotal(), 40.0);
    }

    #[test]
    fn test_severity_display_matches_serde() {
        for severity in [Severity::Success, Severity::Warning, Severity::Danger] {
            let json = serde_json::to_string(&severity).unwrap();
            assert_eq!(json, format!("\"{}\"", severity));
        }
    }
}
