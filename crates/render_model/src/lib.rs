//! Render Model - Surface to draw-list conversion
//!
//! This crate converts a surface's elements into declarative render items
//! (mockup, text, clipped images, selection outline) that the frontend
//! canvas draws bottom-to-top, and defines the image export seam.

mod render_item;
mod converter;
mod clip;
mod export;
mod error;

pub use render_item::*;
pub use converter::*;
pub use clip::*;
pub use export::*;
pub use error::*;
