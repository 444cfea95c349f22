//! Error types for design model operations

use crate::{ProductType, Surface};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesignModelError {
    #[error("Surface {surface} is not available on {product_type}")]
    InvalidSurface {
        surface: Surface,
        product_type: ProductType,
    },

    #[error("Color '{color}' is not offered for {product_type}")]
    InvalidColor {
        color: String,
        product_type: ProductType,
    },

    #[error("Size '{size}' is not offered for {product_type}")]
    InvalidSize {
        size: String,
        product_type: ProductType,
    },

    #[error("A product must keep at least one active surface")]
    EmptySurfaceSet,

    #[error("Gallery item not found: {0}")]
    UnknownGalleryItem(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

pub type Result<T> = std::result::Result<T, DesignModelError>;
