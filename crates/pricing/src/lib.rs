//! Pricing - Price derivation, cart items, and checkout totals
//!
//! Prices derive only from the product configuration, never from the
//! elements placed on it. The cart keeps immutable snapshots of finalized
//! designs and computes subtotal, tax, and shipping through an injected
//! quote provider.

mod error;
mod price;
mod cart;
mod shipping;

pub use error::*;
pub use price::*;
pub use cart::*;
pub use shipping::*;
