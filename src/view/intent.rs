use crate::domain::model::ProductId;
use crate::utils::error::{CartError, Result};

/// A cart mutation requested by the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Add {
        product_id: ProductId,
        quantity: u32,
    },
    /// `quantity: None` re-submits the quantity already in the cart.
    Update {
        product_id: ProductId,
        quantity: Option<u32>,
    },
    Remove {
        product_id: ProductId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Show,
    Help,
    Quit,
}

/// Parses one line of user input.
///
/// ```text
/// add <id> [qty]      update <id> [qty]      remove|delete <id>
/// show                help                   quit|exit
/// ```
pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next().map(str::to_ascii_lowercase);
    let args: Vec<&str> = words.collect();

    let command = match (verb.as_deref(), args.as_slice()) {
        (None, []) | (Some("show"), []) => Command::Show,
        (Some("help"), []) => Command::Help,
        (Some("quit" | "exit"), []) => Command::Quit,
        (Some("add"), [id]) => Command::Intent(Intent::Add {
            product_id: parse_product_id(line, id)?,
            quantity: 1,
        }),
        (Some("add"), [id, qty]) => Command::Intent(Intent::Add {
            product_id: parse_product_id(line, id)?,
            quantity: parse_quantity(qty)?,
        }),
        (Some("update"), [id]) => Command::Intent(Intent::Update {
            product_id: parse_product_id(line, id)?,
            quantity: None,
        }),
        (Some("update"), [id, qty]) => Command::Intent(Intent::Update {
            product_id: parse_product_id(line, id)?,
            quantity: Some(parse_quantity(qty)?),
        }),
        (Some("remove" | "delete"), [id]) => Command::Intent(Intent::Remove {
            product_id: parse_product_id(line, id)?,
        }),
        _ => {
            return Err(CartError::InvalidCommand {
                input: line.trim().to_string(),
            })
        }
    };

    Ok(command)
}

/// Accepts whole numbers from 1 up to `u32::MAX`.
pub fn parse_quantity(raw: &str) -> Result<u32> {
    let invalid = |reason: &str| CartError::InvalidQuantityInput {
        input: raw.to_string(),
        reason: reason.to_string(),
    };

    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("not a whole number"))?;

    if value <= 0 {
        return Err(invalid("quantity must be at least 1"));
    }

    u32::try_from(value).map_err(|_| invalid("quantity is too large"))
}

fn parse_product_id(line: &str, raw: &str) -> Result<ProductId> {
    raw.parse().map_err(|_| CartError::InvalidCommand {
        input: line.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_defaults_to_one() {
        assert_eq!(
            parse_command("add 1").unwrap(),
            Command::Intent(Intent::Add {
                product_id: 1,
                quantity: 1
            })
        );
        assert_eq!(
            parse_command("  ADD 3 4 ").unwrap(),
            Command::Intent(Intent::Add {
                product_id: 3,
                quantity: 4
            })
        );
    }

    #[test]
    fn test_parse_update_and_remove() {
        assert_eq!(
            parse_command("update 1 5").unwrap(),
            Command::Intent(Intent::Update {
                product_id: 1,
                quantity: Some(5)
            })
        );
        assert_eq!(
            parse_command("update 1").unwrap(),
            Command::Intent(Intent::Update {
                product_id: 1,
                quantity: None
            })
        );
        assert_eq!(
            parse_command("delete 2").unwrap(),
            Command::Intent(Intent::Remove { product_id: 2 })
        );
    }

    #[test]
    fn test_parse_plain_commands() {
        assert_eq!(parse_command("").unwrap(), Command::Show);
        assert_eq!(parse_command("show").unwrap(), Command::Show);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_bad_quantities_are_invalid_input() {
        for raw in ["abc", "0", "-2", "1.5", "", "99999999999"] {
            let err = parse_quantity(raw).unwrap_err();
            assert!(
                matches!(err, CartError::InvalidQuantityInput { .. }),
                "{raw} should be rejected"
            );
        }
        assert!(matches!(
            parse_command("add 1 x").unwrap_err(),
            CartError::InvalidQuantityInput { .. }
        ));
    }

    #[test]
    fn test_unknown_verbs_and_ids() {
        assert!(matches!(
            parse_command("buy 1").unwrap_err(),
            CartError::InvalidCommand { .. }
        ));
        assert!(matches!(
            parse_command("add pizza").unwrap_err(),
            CartError::InvalidCommand { .. }
        ));
        assert!(matches!(
            parse_command("remove").unwrap_err(),
            CartError::InvalidCommand { .. }
        ));
    }
}
