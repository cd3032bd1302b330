//! Console command grammar.

use std::str::FromStr;

use thiserror::Error;

use storefront_core::{CartItemId, DomainError, ProductId, Quantity};
use storefront_page::StepDirection;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try: search, price, step, add, update, edit, show, quit)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type into the search box.
    Search(String),
    /// Pick a price bracket token (`0-50`, `50-100`, `100-200`, `200+`, `all`).
    Price(String),
    /// Click a stepper button on the n-th card (1-based).
    Step { card: usize, direction: StepDirection },
    Add { product_id: ProductId, quantity: Quantity },
    Update { cart_item_id: CartItemId, quantity: u64 },
    Edit(ProductId),
    Show,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        match verb {
            // The query keeps inner spaces; an empty query shows everything.
            "search" => Ok(Self::Search(rest.to_string())),
            "price" => match args.as_slice() {
                [token] => Ok(Self::Price(token.to_string())),
                _ => Err(CommandError::Usage("price <0-50|50-100|100-200|200+|all>")),
            },
            "step" => match args.as_slice() {
                [card, dir] => {
                    let card = card
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(CommandError::Usage("step <card number> <+|->"))?;
                    let direction = match *dir {
                        "+" | "up" => StepDirection::Increase,
                        "-" | "down" => StepDirection::Decrease,
                        _ => return Err(CommandError::Usage("step <card number> <+|->")),
                    };
                    Ok(Self::Step { card, direction })
                }
                _ => Err(CommandError::Usage("step <card number> <+|->")),
            },
            "add" => match args.as_slice() {
                [id] => Ok(Self::Add {
                    product_id: id.parse()?,
                    quantity: Quantity::MIN,
                }),
                [id, qty] => Ok(Self::Add {
                    product_id: id.parse()?,
                    quantity: Quantity::parse_input(qty)?,
                }),
                _ => Err(CommandError::Usage("add <product id> [quantity]")),
            },
            "update" => match args.as_slice() {
                [id, qty] => Ok(Self::Update {
                    cart_item_id: id.parse()?,
                    quantity: qty
                        .parse()
                        .map_err(|_| CommandError::Usage("update <cart item id> <quantity, 0 removes>"))?,
                }),
                _ => Err(CommandError::Usage("update <cart item id> <quantity, 0 removes>")),
            },
            "edit" => match args.as_slice() {
                [id] => Ok(Self::Edit(id.parse()?)),
                _ => Err(CommandError::Usage("edit <product id>")),
            },
            "show" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
