//! Error types for pricing and checkout

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("A postal code is required to quote shipping")]
    EmptyPostalCode,

    #[error("Invalid shipping quote: {0}")]
    InvalidQuote(f64),

    #[error("Shipping provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, PricingError>;
