//! Cart items and checkout totals

use crate::{compute_price, PricingError, Result, ShippingQuoteProvider};
use chrono::{DateTime, Utc};
use design_model::{ProductConfiguration, SurfaceDocument};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default sales tax rate applied to the cart subtotal
pub const DEFAULT_TAX_RATE: f64 = 0.0725;

/// Unique identifier for a cart line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartItemId(Uuid);

impl CartItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CartItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finalized design, frozen at the moment it was added to the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    id: CartItemId,
    config: ProductConfiguration,
    design: SurfaceDocument,
    total_price: f64,
    added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn id(&self) -> CartItemId {
        self.id
    }

    pub fn config(&self) -> &ProductConfiguration {
        &self.config
    }

    /// Every surface's elements, including surfaces that are not printed
    pub fn design(&self) -> &SurfaceDocument {
        &self.design
    }

    /// Full-precision price of this line
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}

/// Copy a configuration and its design into an immutable cart item
pub fn finalize_for_cart(config: &ProductConfiguration, document: &SurfaceDocument) -> CartItem {
    let item = CartItem {
        id: CartItemId::new(),
        config: config.clone(),
        design: document.clone(),
        total_price: compute_price(config),
        added_at: Utc::now(),
    };
    tracing::debug!(
        "Finalized {} for cart at {}",
        config.product_type(),
        item.total_price
    );
    item
}

/// Checkout totals derived from the cart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub item_count: usize,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

/// The shopping cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    tax_rate: f64,
    shipping_cost: f64,
    postal_code: Option<String>,
}

impl Cart {
    /// Create an empty cart with the default tax rate
    pub fn new() -> Self {
        Self::with_tax_rate(DEFAULT_TAX_RATE)
    }

    pub fn with_tax_rate(tax_rate: f64) -> Self {
        Self {
            items: Vec::new(),
            tax_rate,
            shipping_cost: 0.0,
            postal_code: None,
        }
    }

    pub fn add(&mut self, item: CartItem) -> CartItemId {
        let id = item.id();
        tracing::info!("Added {} to cart", id);
        self.items.push(item);
        id
    }

    /// Remove a line, returning it. Removing an absent id does nothing.
    pub fn remove(&mut self, id: CartItemId) -> Option<CartItem> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        tracing::info!("Removed {} from cart", id);
        Some(self.items.remove(position))
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::total_price).sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * self.tax_rate
    }

    pub fn shipping_cost(&self) -> f64 {
        self.shipping_cost
    }

    /// Postal code of the last successful shipping quote
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    /// Ask a provider for shipping to a postal code.
    ///
    /// On any error the previous shipping cost is kept.
    pub fn quote_shipping(
        &mut self,
        provider: &mut dyn ShippingQuoteProvider,
        postal_code: &str,
    ) -> Result<f64> {
        let postal_code = postal_code.trim();
        if postal_code.is_empty() {
            return Err(PricingError::EmptyPostalCode);
        }

        let quote = provider.quote(postal_code)?;
        if !quote.is_finite() || quote < 0.0 {
            return Err(PricingError::InvalidQuote(quote));
        }

        tracing::debug!("{} quoted {} to {}", provider.name(), quote, postal_code);
        self.shipping_cost = quote;
        self.postal_code = Some(postal_code.to_string());
        Ok(quote)
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal * self.tax_rate;
        CartTotals {
            item_count: self.items.len(),
            subtotal,
            tax,
            shipping: self.shipping_cost,
            total: subtotal + tax + self.shipping_cost,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
