//! Error types for canvas editing operations

use design_model::{DesignModelError, ProductType, Surface};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Surface {surface} is not available on {product_type}")]
    InvalidSurface {
        surface: Surface,
        product_type: ProductType,
    },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Design model error: {0}")]
    DesignModel(#[from] DesignModelError),
}

pub type Result<T> = std::result::Result<T, EditError>;
