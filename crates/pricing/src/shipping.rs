//! Shipping quote providers
//!
//! Shipping cost is owned by the checkout layer. The cart asks a provider for
//! a quote instead of computing one itself.

use crate::{PricingError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of shipping quotes for a destination postal code
pub trait ShippingQuoteProvider: Send {
    /// Quote the shipping cost to a postal code
    fn quote(&mut self, postal_code: &str) -> Result<f64>;

    /// Get a display name for this provider
    fn name(&self) -> &str;
}

/// Lowest simulated quote
pub const SIMULATED_BASE_COST: f64 = 10.50;

/// Number of whole-dollar steps added on top of the base cost
pub const SIMULATED_SPREAD: u32 = 15;

/// Stand-in carrier that returns a random whole-dollar amount above a base cost
#[derive(Debug)]
pub struct SimulatedShipping {
    rng: StdRng,
}

impl SimulatedShipping {
    /// Create a provider seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a provider with a fixed seed for reproducible quotes
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SimulatedShipping {
    fn default() -> Self {
        Self::new()
    }
}

impl ShippingQuoteProvider for SimulatedShipping {
    fn quote(&mut self, postal_code: &str) -> Result<f64> {
        if postal_code.trim().is_empty() {
            return Err(PricingError::EmptyPostalCode);
        }
        let steps = self.rng.gen_range(0..SIMULATED_SPREAD);
        Ok(f64::from(steps) + SIMULATED_BASE_COST)
    }

    fn name(&self) -> &str {
        "Simulated USPS"
    }
}

/// Provider that quotes the same amount everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRateShipping {
    rate: f64,
}

impl FlatRateShipping {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl ShippingQuoteProvider for FlatRateShipping {
    fn quote(&mut self, postal_code: &str) -> Result<f64> {
        if postal_code.trim().is_empty() {
            return Err(PricingError::EmptyPostalCode);
        }
        Ok(self.rate)
    }

    fn name(&self) -> &str {
        "Flat rate"
    }
}
