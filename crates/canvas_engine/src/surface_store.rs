//! Per-surface element lists
//!
//! The store only validates that appends and wholesale replacements target
//! a surface the current product can print. Committing to history after a
//! mutation is the controller's job.

use crate::{EditError, Result};
use design_model::{
    Catalog, DesignElement, ElementId, ElementPatch, ProductType, Surface, SurfaceDocument,
};

/// Holds the ordered element list of every surface
#[derive(Debug, Clone)]
pub struct SurfaceStore {
    document: SurfaceDocument,
    product_type: ProductType,
    legal: Vec<Surface>,
}

impl SurfaceStore {
    /// Create an empty store for a product type
    pub fn new(catalog: &Catalog, product_type: ProductType) -> Self {
        Self {
            document: SurfaceDocument::default(),
            product_type,
            legal: catalog.legal_surfaces(product_type).to_vec(),
        }
    }

    /// Point the store at another product type.
    ///
    /// Elements on surfaces the new type cannot print are kept as they are.
    pub fn retarget(&mut self, catalog: &Catalog, product_type: ProductType) {
        self.product_type = product_type;
        self.legal = catalog.legal_surfaces(product_type).to_vec();
    }

    pub fn is_legal(&self, surface: Surface) -> bool {
        self.legal.contains(&surface)
    }

    pub fn list_elements(&self, surface: Surface) -> &[DesignElement] {
        &self.document[surface]
    }

    pub fn find(&self, surface: Surface, id: ElementId) -> Option<&DesignElement> {
        self.document[surface].iter().find(|e| e.id() == id)
    }

    /// Add an element on top of the surface's z-order
    pub fn append(&mut self, surface: Surface, element: DesignElement) -> Result<()> {
        self.check_legal(surface)?;
        self.document[surface].push(element);
        Ok(())
    }

    /// Replace a surface's whole element list
    pub fn replace_all(&mut self, surface: Surface, elements: Vec<DesignElement>) -> Result<()> {
        self.check_legal(surface)?;
        self.document[surface] = elements;
        Ok(())
    }

    /// Merge a patch into an element.
    ///
    /// Returns true only if the element exists and a field changed; a
    /// missing element is a no-op.
    pub fn update(&mut self, surface: Surface, id: ElementId, patch: &ElementPatch) -> bool {
        match self.document[surface].iter_mut().find(|e| e.id() == id) {
            Some(element) => element.apply_patch(patch),
            None => false,
        }
    }

    /// Remove an element, returning it; a missing element is a no-op
    pub fn remove(&mut self, surface: Surface, id: ElementId) -> Option<DesignElement> {
        let elements = &mut self.document[surface];
        let position = elements.iter().position(|e| e.id() == id)?;
        Some(elements.remove(position))
    }

    pub fn document(&self) -> &SurfaceDocument {
        &self.document
    }

    fn check_legal(&self, surface: Surface) -> Result<()> {
        if self.is_legal(surface) {
            Ok(())
        } else {
            Err(EditError::InvalidSurface {
                surface,
                product_type: self.product_type,
            })
        }
    }
}
