//! Catalog file I/O

use crate::{Result, StoreError};
use design_model::Catalog;
use std::path::Path;

/// Load and validate a catalog file
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = tokio::fs::read_to_string(path).await?;
    let catalog = Catalog::from_json(&json)?;
    tracing::info!("Loaded catalog from {}", path.display());
    Ok(catalog)
}

/// Load and validate a catalog file synchronously
pub fn load_catalog_sync(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_json(&json)?;
    tracing::info!("Loaded catalog from {}", path.display());
    Ok(catalog)
}

/// Write a catalog as pretty JSON, e.g. as a starting point for an override
pub fn save_catalog_sync(catalog: &Catalog, path: impl AsRef<Path>) -> Result<()> {
    let json = catalog.to_json_pretty()?;
    std::fs::write(path, json)?;
    Ok(())
}
