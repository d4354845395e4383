use serde::Serialize;

use super::model::{CartLine, CartLineId};

/// Discrete changes applied to a cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Appends the line as-is; identical configurations are not merged.
    Add(CartLine),
    Remove(CartLineId),
    /// A quantity of zero or less removes the line.
    UpdateQuantity(CartLineId, i32),
    Clear,
    Load(Vec<CartLine>),
}

/// Ordered cart lines and the totals derived from them.
///
/// Totals are private and rederived from `items` on every transition, so they
/// can never drift from the lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLine>,
    total_items: i64,
    total_price: i64,
}

impl CartState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total_items = items.iter().map(|line| i64::from(line.quantity)).sum();
        let total_price = items
            .iter()
            .fold(0i64, |sum, line| sum.saturating_add(line.total_price));
        Self {
            items,
            total_items,
            total_price,
        }
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &CartLineId) -> Option<&CartLine> {
        self.items.iter().find(|line| &line.id == id)
    }

    pub fn into_items(self) -> Vec<CartLine> {
        self.items
    }

    pub fn apply(self, action: CartAction) -> Self {
        let items = match action {
            CartAction::Add(line) => {
                let mut items = self.items;
                items.push(line);
                items
            }
            CartAction::Remove(id) => without(self.items, &id),
            CartAction::UpdateQuantity(id, quantity) if quantity <= 0 => without(self.items, &id),
            CartAction::UpdateQuantity(id, quantity) => self
                .items
                .into_iter()
                .map(|line| {
                    if line.id == id {
                        line.with_quantity(quantity)
                    } else {
                        line
                    }
                })
                .collect(),
            CartAction::Clear => Vec::new(),
            CartAction::Load(items) => items,
        };
        Self::from_lines(items)
    }
}

fn without(items: Vec<CartLine>, id: &CartLineId) -> Vec<CartLine> {
    items.into_iter().filter(|line| &line.id != id).collect()
}

/// Produces the next state without touching the current one.
pub fn reduce(state: &CartState, action: CartAction) -> CartState {
    state.clone().apply(action)
}
