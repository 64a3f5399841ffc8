//! Cart and cart line types.

use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The user's current selection: an ordered sequence of lines, at most one
/// per product.
///
/// Serializes as a plain JSON array of lines, which is the snapshot format
/// written to persistence. Deserializing applies the same checks as
/// [`Cart::from_lines`].
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines, rejecting duplicate products and
    /// non-positive amounts.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(line.product_id()) {
                return Err(CartError::Snapshot(format!(
                    "duplicate line for product {}",
                    line.product_id()
                )));
            }
            if line.amount < 1 {
                return Err(CartError::Snapshot(format!(
                    "invalid amount {} for product {}",
                    line.amount,
                    line.product_id()
                )));
            }
        }
        Ok(Self { lines })
    }

    /// Decode a persisted snapshot.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, CartError> {
        let lines: Vec<CartLine> = serde_json::from_str(snapshot)?;
        Self::from_lines(lines)
    }

    /// Encode the cart as a snapshot string.
    pub fn to_snapshot(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over lines.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Check whether a product has a line.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Amount held for a product, if it is in the cart.
    pub fn amount_of(&self, product_id: ProductId) -> Option<i64> {
        self.get(product_id).map(|l| l.amount)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    pub fn size(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Amount per product, for badge counters on listing pages.
    pub fn amounts(&self) -> BTreeMap<ProductId, i64> {
        self.lines
            .iter()
            .map(|l| (l.product_id(), l.amount))
            .collect()
    }

    /// Sum of line subtotals.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn total(&self, currency: Currency) -> Result<Money, CartError> {
        let subtotals = self
            .lines
            .iter()
            .map(|l| l.subtotal(currency))
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(subtotals.iter(), currency)
            .ok_or_else(|| CartError::Overflow("cart total".to_string()))
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        debug_assert!(!self.contains(line.product_id()));
        self.lines.push(line);
    }

    pub(crate) fn set_amount(&mut self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id() == product_id)
            .ok_or(CartError::NotFound(product_id))?;
        line.amount = amount;
        Ok(())
    }

    pub(crate) fn remove(&mut self, product_id: ProductId) -> Result<CartLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id() == product_id)
            .ok_or(CartError::NotFound(product_id))?;
        Ok(self.lines.remove(index))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lines = Vec::<CartLine>::deserialize(deserializer)?;
        Cart::from_lines(lines).map_err(serde::de::Error::custom)
    }
}

/// One product's presence in the cart: its data plus the amount held.
///
/// On the wire this is the product object with an `amount` field added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product data captured when the line was created.
    #[serde(flatten)]
    pub product: Product,
    /// Units held, always at least 1.
    pub amount: i64,
}

impl CartLine {
    /// Create a new line.
    ///
    /// An `amount` field carried over from the catalog payload is dropped;
    /// the line's own amount is the only one written out.
    pub fn new(mut product: Product, amount: i64) -> Self {
        product.extra.remove("amount");
        Self { product, amount }
    }

    /// The product this line is keyed by.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self, currency: Currency) -> Result<Money, CartError> {
        self.product
            .unit_price(currency)
            .try_multiply(self.amount)
            .ok_or_else(|| {
                CartError::Overflow(format!("subtotal of product {}", self.product_id()))
            })
    }
}
