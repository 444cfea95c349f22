//! Design Model - Placeable design elements and product configuration
//!
//! This crate provides the data model for the product customizer: text and
//! image elements with their geometry, the closed set of printable surfaces
//! with fixed-size per-surface tables, and the product configuration that is
//! validated against the static catalog.

mod element_id;
mod surface;
mod element;
mod product;
mod error;
pub mod catalog;

pub use element_id::*;
pub use surface::*;
pub use element::*;
pub use product::*;
pub use error::*;
pub use catalog::{Catalog, ColorSwatch, GalleryItem, ProductSpec};
