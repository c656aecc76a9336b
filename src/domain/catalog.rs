use crate::domain::model::{Product, ProductId};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_price, validate_unique, Validate,
};

/// Read-only product list, injected into the storefront.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let catalog = Self { products };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The menu the widget ships with.
    pub fn default_menu() -> Self {
        Self {
            products: vec![
                Product::new(1, "Pizza", 30.0, 5, "images/pizza.jpg"),
                Product::new(2, "Hamburger", 15.0, 0, "images/Hamburger.jpg"),
                Product::new(3, "Bread", 20.0, 10, "images/bread.jpg"),
                Product::new(4, "Cake", 10.0, 0, "images/Cake.jpg"),
            ],
        }
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        validate_unique("products.id", self.products.iter().map(|p| p.id))?;
        for product in &self.products {
            validate_non_empty_string("products.name", &product.name)?;
            validate_price("products.price", product.price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu() {
        let catalog = Catalog::default_menu();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 4);

        let pizza = catalog.find(1).unwrap();
        assert_eq!(pizza.name, "Pizza");
        assert_eq!(pizza.stock, 5);
        assert!(catalog.find(2).unwrap().is_out_of_stock());
        assert!(catalog.find(99).is_none());
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Product::new(1, "Pizza", 30.0, 5, "a.jpg"),
            Product::new(1, "Bread", 20.0, 10, "b.jpg"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_negative_price_and_blank_name() {
        assert!(Catalog::new(vec![Product::new(1, "Pizza", -1.0, 5, "a.jpg")]).is_err());
        assert!(Catalog::new(vec![Product::new(1, "  ", 1.0, 5, "a.jpg")]).is_err());
    }
}
