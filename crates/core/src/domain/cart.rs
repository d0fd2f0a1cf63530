use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};

/// A product copied into the cart plus a quantity counter. Quantity is
/// always at least 1; an entry that would drop to 0 is removed instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// In-memory cart: at most one entry per product identifier, iteration in
/// first-add insertion order. Absence of an entry is a normal case for every
/// operation, never an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the quantity for an already-carted product, or insert a new
    /// entry with quantity 1. Repeat adds never touch the first-added copy of
    /// the product fields.
    pub fn add(&mut self, product: &Product) {
        match self.entries.iter_mut().find(|entry| entry.product.id == product.id) {
            Some(entry) => entry.quantity += 1,
            None => self.entries.push(CartEntry { product: product.clone(), quantity: 1 }),
        }
    }

    /// Decrement the quantity for `id`, removing the entry once it reaches 0.
    /// A missing entry is a silent no-op.
    pub fn decrease(&mut self, id: ProductId) {
        let Some(position) = self.entries.iter().position(|entry| entry.product.id == id) else {
            return;
        };

        if self.entries[position].quantity > 1 {
            self.entries[position].quantity -= 1;
        } else {
            self.entries.remove(position);
        }
    }

    /// Delete the entry for `id` regardless of quantity. Idempotent.
    pub fn remove(&mut self, id: ProductId) {
        self.entries.retain(|entry| entry.product.id != id);
    }

    /// Derived sum of price x quantity over all entries. Never cached.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.product.id == id)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
