//! Text rendering of the storefront. Every function here is pure: same
//! catalog, cart and notification in, same page out.

use crate::domain::catalog::Catalog;
use crate::domain::model::{CartLine, Notification};
use std::fmt::Write;

pub const EMPTY_CART_PLACEHOLDER: &str = "Your cart is empty";

/// Prices are shown with two decimals so float noise never reaches the page.
pub fn format_usd(amount: f64) -> String {
    format!("{:.2} USD", amount)
}

pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("== List Products ==\n");
    for product in catalog.products() {
        let action = if product.is_out_of_stock() {
            "[Out of Stock]"
        } else {
            "[Add to Cart]"
        };
        let _ = writeln!(
            out,
            "  {:>3}  {:<16} {} - In stock: {}  {}",
            product.id,
            product.name,
            format_usd(product.price),
            product.stock,
            action
        );
    }
    out
}

pub fn render_cart(lines: &[CartLine]) -> String {
    let mut out = String::from("== Your Cart ==\n");
    if lines.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_CART_PLACEHOLDER);
        return out;
    }

    let _ = writeln!(
        out,
        "  {:>3}  {:<16} {:>10} {:>8} {:>10}",
        "#", "Product", "Price", "Quantity", "Total"
    );
    for (index, line) in lines.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}  {:<16} {:>10} {:>8} {:>10}",
            index + 1,
            line.product.name,
            format_usd(line.product.price),
            line.quantity,
            format_usd(line.subtotal()),
        );
    }

    let total: f64 = lines.iter().map(CartLine::subtotal).sum();
    let _ = writeln!(
        out,
        "  There are {} items in your shopping cart.  Total: {}",
        lines.len(),
        format_usd(total)
    );
    out
}

pub fn render_notification(notification: Option<&Notification>) -> Option<String> {
    notification.map(|n| format!("[{}] {}", n.severity, n.message))
}

pub fn render_page(
    catalog: &Catalog,
    lines: &[CartLine],
    notification: Option<&Notification>,
) -> String {
    let mut page = String::from("=== Shopping Cart ===\n");
    page.push_str(&render_catalog(catalog));
    page.push('\n');
    page.push_str(&render_cart(lines));
    if let Some(alert) = render_notification(notification) {
        page.push('\n');
        page.push_str(&alert);
        page.push('\n');
    }
    page
}

pub fn help_text() -> &'static str {
    "Commands:\n  \
     add <id> [qty]     add a product (default quantity 1)\n  \
     update <id> [qty]  set the quantity of a cart line\n  \
     remove <id>        remove a cart line (alias: delete)\n  \
     show               redraw the page\n  \
     help               show this help\n  \
     quit               leave (alias: exit)\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Product, Severity};
    use chrono::Utc;

    #[test]
    fn test_out_of_stock_affordance() {
        let rendered = render_catalog(&Catalog::default_menu());
        let hamburger = rendered.lines().find(|l| l.contains("Hamburger")).unwrap();
        let pizza = rendered.lines().find(|l| l.contains("Pizza")).unwrap();

        assert!(hamburger.contains("[Out of Stock]"));
        assert!(pizza.contains("[Add to Cart]"));
        assert!(pizza.contains("30.00 USD - In stock: 5"));
    }

    #[test]
    fn test_empty_cart_placeholder() {
        let rendered = render_cart(&[]);
        assert!(rendered.contains(EMPTY_CART_PLACEHOLDER));
        assert!(!rendered.contains("Total"));
    }

    #[test]
    fn test_cart_summary_row() {
        let lines = vec![
            CartLine {
                product: Product::new(1, "Pizza", 30.0, 5, "p"),
                quantity: 3,
            },
            CartLine {
                product: Product::new(3, "Bread", 20.0, 10, "b"),
                quantity: 1,
            },
        ];
        let rendered = render_cart(&lines);

        assert!(rendered.contains("90.00 USD"));
        assert!(rendered.contains("There are 2 items in your shopping cart."));
        assert!(rendered.contains("Total: 110.00 USD"));
    }

    #[test]
    fn test_fractional_totals_render_two_decimals() {
        let lines = vec![CartLine {
            product: Product::new(5, "Water", 0.1, 10, "w"),
            quantity: 3,
        }];
        let rendered = render_cart(&lines);

        assert!(rendered.contains("0.10 USD"));
        assert!(rendered.contains("Total: 0.30 USD"));
        assert!(!rendered.contains("0.30000000000000004"));
    }

    #[test]
    fn test_page_includes_notification_only_when_present() {
        let catalog = Catalog::default_menu();
        let notification = Notification {
            id: 1,
            message: "Add to cart successfully".to_string(),
            severity: Severity::Success,
            created_at: Utc::now(),
        };

        let with = render_page(&catalog, &[], Some(&notification));
        assert!(with.contains("[success] Add to cart successfully"));

        let without = render_page(&catalog, &[], None);
        assert!(!without.contains("[success]"));
    }
}
