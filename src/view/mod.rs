pub mod intent;
pub mod render;

pub use intent::{parse_command, parse_quantity, Command, Intent};
pub use render::{format_usd, render_cart, render_catalog, render_notification, render_page};
