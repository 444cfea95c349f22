//! Image export seam
//!
//! Producing a print-ready image is delegated to a provider. The placeholder
//! provider hands back a fixed preview URL so the rest of the flow can run
//! without a rasterizer.

use crate::{RenderError, RenderFrame, Result};
use design_model::ProductConfiguration;
use serde::{Deserialize, Serialize};

/// A finished export ready for download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedImage {
    pub file_name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Turns a render frame into a downloadable image
pub trait ImageExportProvider: Send + Sync {
    fn export(&self, frame: &RenderFrame, product: &ProductConfiguration) -> Result<ExportedImage>;
}

/// Export provider that returns a stock preview image
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderExport {
    url: String,
    file_prefix: String,
}

impl PlaceholderExport {
    pub fn new(url: impl Into<String>, file_prefix: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_prefix: file_prefix.into(),
        }
    }

    /// Download name for a product, e.g. `sharjays-t-shirt-design.png`
    pub fn file_name(&self, product: &ProductConfiguration) -> String {
        let slug = product.product_type().slug();
        if self.file_prefix.is_empty() {
            format!("{slug}-design.png")
        } else {
            format!("{}-{slug}-design.png", self.file_prefix)
        }
    }
}

impl Default for PlaceholderExport {
    fn default() -> Self {
        Self::new("https://picsum.photos/800/800", "sharjays")
    }
}

impl ImageExportProvider for PlaceholderExport {
    fn export(&self, frame: &RenderFrame, product: &ProductConfiguration) -> Result<ExportedImage> {
        if self.url.is_empty() {
            return Err(RenderError::ExportFailed("no preview URL configured".to_string()));
        }

        let image = ExportedImage {
            file_name: self.file_name(product),
            url: self.url.clone(),
            width: frame.width.round() as u32,
            height: frame.height.round() as u32,
        };
        tracing::info!("Exported {} as {}", frame.surface, image.file_name);
        Ok(image)
    }
}
