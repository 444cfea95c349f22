//! Selection and mutation controller
//!
//! The controller owns the product configuration, the surface store, and
//! the history, and exposes the verbs the canvas UI calls. Every verb that
//! adds, removes, or restores elements commits to history. Continuous edits
//! through [`DesignController::update_selected`] are held back until the
//! gesture ends, so a slider drag becomes a single undo step.

use crate::{ConfigCommand, EditError, HistoryManager, Result, SurfaceStore, Zoom};
use design_model::{
    Catalog, DesignElement, ElementId, ElementPatch, ImagePlacement, ProductConfiguration,
    ProductType, Surface, SurfaceDocument, SurfaceMap, TextDefaults,
};
use std::sync::Arc;

/// Tunables for a design session
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Undo steps kept per surface; unbounded when `None`
    pub history_limit: Option<usize>,
    /// Initial zoom level
    pub default_zoom: f64,
    /// Template for new text elements
    pub text_defaults: TextDefaults,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            history_limit: None,
            default_zoom: 1.0,
            text_defaults: TextDefaults::default(),
        }
    }
}

/// The design canvas state machine
pub struct DesignController {
    catalog: Arc<Catalog>,
    config: ProductConfiguration,
    store: SurfaceStore,
    history: HistoryManager,
    active_surface: Surface,
    selected: Option<ElementId>,
    /// Surfaces with edits applied to the store but not yet committed
    pending: SurfaceMap<bool>,
    zoom: Zoom,
    text_defaults: TextDefaults,
}

impl DesignController {
    /// Open the canvas for a product type with default options
    pub fn new(catalog: Arc<Catalog>, product_type: ProductType) -> Self {
        Self::with_options(catalog, product_type, ControllerOptions::default())
    }

    pub fn with_options(
        catalog: Arc<Catalog>,
        product_type: ProductType,
        options: ControllerOptions,
    ) -> Self {
        let config = ProductConfiguration::new(&catalog, product_type);
        let store = SurfaceStore::new(&catalog, product_type);
        tracing::debug!("Opened design canvas for {}", product_type);

        Self {
            catalog,
            config,
            store,
            history: HistoryManager::with_limit(options.history_limit),
            active_surface: Surface::Front,
            selected: None,
            pending: SurfaceMap::default(),
            zoom: Zoom::new(options.default_zoom),
            text_defaults: options.text_defaults,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ProductConfiguration {
        &self.config
    }

    pub fn active_surface(&self) -> Surface {
        self.active_surface
    }

    pub fn selected_element_id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, if it is on the active surface
    pub fn selected_element(&self) -> Option<&DesignElement> {
        self.selected
            .and_then(|id| self.store.find(self.active_surface, id))
    }

    pub fn elements(&self, surface: Surface) -> &[DesignElement] {
        self.store.list_elements(surface)
    }

    pub fn active_elements(&self) -> &[DesignElement] {
        self.store.list_elements(self.active_surface)
    }

    /// The live document, including edits of an unfinished gesture
    pub fn document(&self) -> &SurfaceDocument {
        self.store.document()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn set_zoom(&mut self, value: f64) {
        self.zoom = Zoom::new(value);
    }

    pub fn can_undo(&self) -> bool {
        self.pending[self.active_surface] || self.history.can_undo(self.active_surface)
    }

    pub fn can_redo(&self) -> bool {
        !self.pending[self.active_surface] && self.history.can_redo(self.active_surface)
    }

    /// True if any surface has edits waiting for the end of a gesture
    pub fn has_pending_edits(&self) -> bool {
        self.pending.iter().any(|(_, pending)| *pending)
    }

    /// Add a text element with the session's text defaults and select it
    pub fn add_text(&mut self) -> Result<ElementId> {
        let element = DesignElement::text(&self.text_defaults);
        self.insert(element)
    }

    /// Add an uploaded image and select it
    pub fn add_image(&mut self, content_ref: impl Into<String>) -> Result<ElementId> {
        let element = DesignElement::image(content_ref, &ImagePlacement::upload());
        self.insert(element)
    }

    /// Add a gallery design by gallery id and select it
    pub fn add_from_gallery(&mut self, gallery_id: &str) -> Result<ElementId> {
        let url = self.catalog.gallery_item(gallery_id)?.url.clone();
        let element = DesignElement::image(url, &ImagePlacement::gallery());
        self.insert(element)
    }

    fn insert(&mut self, element: DesignElement) -> Result<ElementId> {
        let surface = self.active_surface;
        self.flush_pending(surface);

        let id = element.id();
        self.store.append(surface, element)?;
        self.selected = Some(id);
        self.commit(surface);

        tracing::debug!("Added element {} on {}", id, surface);
        Ok(id)
    }

    /// Apply a patch to the selected element without committing.
    ///
    /// The change is committed by [`end_gesture`](Self::end_gesture) or by
    /// the next committing verb. Returns whether anything changed.
    pub fn update_selected(&mut self, patch: &ElementPatch) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let surface = self.active_surface;
        let changed = self.store.update(surface, id, patch);
        if changed {
            self.pending[surface] = true;
        }
        changed
    }

    /// Commit every surface that has uncommitted edits
    pub fn end_gesture(&mut self) {
        for surface in Surface::ALL {
            self.flush_pending(surface);
        }
    }

    /// Apply a patch to the selected element as one complete gesture
    pub fn apply_to_selected(&mut self, patch: &ElementPatch) -> bool {
        let changed = self.update_selected(patch);
        self.end_gesture();
        changed
    }

    /// Delete the selected element and clear the selection
    pub fn delete_selected(&mut self) -> Option<DesignElement> {
        let id = self.selected?;
        let surface = self.active_surface;
        self.flush_pending(surface);

        let removed = self.store.remove(surface, id);
        self.selected = None;
        if removed.is_some() {
            self.commit(surface);
            tracing::debug!("Deleted element {} on {}", id, surface);
        }
        removed
    }

    /// Change the selection. Never touches history.
    ///
    /// Selecting an id that is not on the active surface clears the
    /// selection. Returns whether an element is now selected.
    pub fn select_element(&mut self, id: Option<ElementId>) -> bool {
        self.selected = id.filter(|id| self.store.find(self.active_surface, *id).is_some());
        self.selected.is_some()
    }

    /// Switch the active surface.
    ///
    /// Surfaces the product cannot print are ignored. Switching to a surface
    /// marks it as printed, which affects the multi-surface price.
    pub fn set_active_surface(&mut self, surface: Surface) -> bool {
        if !self.store.is_legal(surface) {
            tracing::debug!(
                "Ignoring switch to {} on {}",
                surface,
                self.config.product_type()
            );
            return false;
        }

        self.flush_pending(self.active_surface);
        if surface != self.active_surface {
            self.selected = None;
        }
        self.active_surface = surface;

        match self.config.set_surface_active(&self.catalog, surface, true) {
            Ok(true) => tracing::debug!("Activated surface {}", surface),
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to activate surface {}: {}", surface, e),
        }
        true
    }

    /// Undo on the active surface. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let surface = self.active_surface;
        self.flush_pending(surface);
        match self.history.undo(surface) {
            Ok(snapshot) => {
                self.restore(surface, snapshot)?;
                Ok(true)
            }
            Err(EditError::NothingToUndo) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Redo on the active surface. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        let surface = self.active_surface;
        self.flush_pending(surface);
        match self.history.redo(surface) {
            Ok(snapshot) => {
                self.restore(surface, snapshot)?;
                Ok(true)
            }
            Err(EditError::NothingToRedo) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn restore(&mut self, surface: Surface, snapshot: Vec<DesignElement>) -> Result<()> {
        self.store.replace_all(surface, snapshot)?;
        if let Some(id) = self.selected {
            if self.store.find(surface, id).is_none() {
                self.selected = None;
            }
        }
        Ok(())
    }

    /// Apply a typed configuration command
    pub fn apply_config(&mut self, command: &ConfigCommand) -> Result<()> {
        self.end_gesture();
        command.apply(&mut self.config, &self.catalog)?;
        tracing::debug!("Applied {}", command.display_name());

        if let ConfigCommand::SetProductType { product_type } = command {
            self.store.retarget(&self.catalog, *product_type);
        }

        // The active surface must stay priced
        if !self.config.surfaces().contains(self.active_surface) {
            let fallback = self.config.surfaces().iter().next().unwrap_or(Surface::Front);
            tracing::debug!(
                "Surface {} no longer active, switching to {}",
                self.active_surface,
                fallback
            );
            self.active_surface = fallback;
            self.selected = None;
        }
        Ok(())
    }

    /// Commit pending edits and return a full copy of the document
    pub fn snapshot(&mut self) -> SurfaceDocument {
        self.end_gesture();
        self.store.document().clone()
    }

    fn flush_pending(&mut self, surface: Surface) {
        if self.pending[surface] {
            self.commit(surface);
        }
    }

    fn commit(&mut self, surface: Surface) {
        self.history
            .commit(surface, self.store.list_elements(surface).to_vec());
        self.pending[surface] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_model::{ClipShape, Material};

    fn controller(product_type: ProductType) -> DesignController {
        DesignController::new(Arc::new(Catalog::default()), product_type)
    }

    #[test]
    fn test_add_text_selects_and_commits() {
        let mut ctl = controller(ProductType::TShirt);
        let id = ctl.add_text().unwrap();

        assert_eq!(ctl.selected_element_id(), Some(id));
        assert_eq!(ctl.active_elements().len(), 1);
        assert_eq!(ctl.history().stack(Surface::Front).len(), 2);
        assert!(ctl.can_undo());
    }

    #[test]
    fn test_update_selected_defers_commit_until_gesture_end() {
        let mut ctl = controller(ProductType::TShirt);
        ctl.add_text().unwrap();

        for width in 100..150 {
            ctl.update_selected(&ElementPatch::new().size(width as f64, 50.0));
        }
        assert_eq!(ctl.history().stack(Surface::Front).len(), 2);
        assert!(ctl.has_pending_edits());

        ctl.end_gesture();
        assert_eq!(ctl.history().stack(Surface::Front).len(), 3);
        assert!(!ctl.has_pending_edits());

        // One undo reverts the whole drag
        ctl.undo().unwrap();
        assert_eq!(ctl.selected_element().unwrap().geometry().width, 200.0);
    }

    #[test]
    fn test_update_without_selection_is_noop() {
        let mut ctl = controller(ProductType::TShirt);
        assert!(!ctl.update_selected(&ElementPatch::new().content("X")));
        assert!(!ctl.has_pending_edits());
    }

    #[test]
    fn test_update_after_delete_is_noop() {
        let mut ctl = controller(ProductType::TShirt);
        let id = ctl.add_text().unwrap();
        ctl.delete_selected().unwrap();
        let depth = ctl.history().stack(Surface::Front).len();

        // A late update from a control still bound to the removed element
        ctl.selected = Some(id);
        assert!(!ctl.update_selected(&ElementPatch::new().content("late")));
        ctl.end_gesture();
        assert_eq!(ctl.history().stack(Surface::Front).len(), depth);
    }

    #[test]
    fn test_undo_redo_swallow_boundaries() {
        let mut ctl = controller(ProductType::TShirt);
        assert!(!ctl.undo().unwrap());
        assert!(!ctl.redo().unwrap());

        ctl.add_text().unwrap();
        assert!(ctl.undo().unwrap());
        assert!(ctl.active_elements().is_empty());
        assert_eq!(ctl.selected_element_id(), None);
        assert!(ctl.redo().unwrap());
        assert_eq!(ctl.active_elements().len(), 1);
    }

    #[test]
    fn test_undo_flushes_pending_gesture_first() {
        let mut ctl = controller(ProductType::TShirt);
        ctl.add_text().unwrap();
        ctl.update_selected(&ElementPatch::new().content("DRAFT"));

        assert!(ctl.undo().unwrap());
        assert_eq!(ctl.selected_element().unwrap().as_text().unwrap().content, "YOUR TEXT HERE");
        assert!(ctl.redo().unwrap());
        assert_eq!(ctl.selected_element().unwrap().as_text().unwrap().content, "DRAFT");
    }

    #[test]
    fn test_first_touch_activates_surface() {
        let mut ctl = controller(ProductType::Hoodie);
        assert!(!ctl.config().is_multi_surface());

        assert!(ctl.set_active_surface(Surface::Back));
        assert_eq!(ctl.active_surface(), Surface::Back);
        assert!(ctl.config().surfaces().contains(Surface::Back));
        assert!(ctl.config().is_multi_surface());
        assert!(ctl.active_elements().is_empty());
    }

    #[test]
    fn test_illegal_surface_switch_is_ignored() {
        let mut ctl = controller(ProductType::TShirt);
        assert!(!ctl.set_active_surface(Surface::Left));
        assert_eq!(ctl.active_surface(), Surface::Front);
        assert_eq!(ctl.config().surfaces().len(), 1);
    }

    #[test]
    fn test_surface_switch_clears_selection() {
        let mut ctl = controller(ProductType::CoffeeMug);
        ctl.add_text().unwrap();
        ctl.set_active_surface(Surface::Right);
        assert_eq!(ctl.selected_element_id(), None);
    }

    #[test]
    fn test_undo_is_scoped_to_active_surface() {
        let mut ctl = controller(ProductType::TShirt);
        ctl.add_text().unwrap();
        ctl.set_active_surface(Surface::Back);
        ctl.add_image("data:image/png;base64,AAAA").unwrap();
        ctl.set_active_surface(Surface::Front);

        let back_before = ctl.elements(Surface::Back).to_vec();
        let back_index = ctl.history().stack(Surface::Back).index();

        assert!(ctl.undo().unwrap());
        assert!(ctl.elements(Surface::Front).is_empty());
        assert_eq!(ctl.elements(Surface::Back), back_before.as_slice());
        assert_eq!(ctl.history().stack(Surface::Back).index(), back_index);
    }

    #[test]
    fn test_add_from_gallery() {
        let mut ctl = controller(ProductType::ToteBag);
        ctl.add_from_gallery("g1").unwrap();
        let element = ctl.selected_element().unwrap();
        assert_eq!(element.geometry().width, 100.0);
        assert!(element.as_image().unwrap().content_ref.contains("design1"));

        assert!(ctl.add_from_gallery("missing").is_err());
        assert_eq!(ctl.active_elements().len(), 1);
    }

    #[test]
    fn test_apply_to_selected_commits_once() {
        let mut ctl = controller(ProductType::TShirt);
        ctl.add_image("ref").unwrap();
        assert!(ctl.apply_to_selected(&ElementPatch::new().clip_shape(ClipShape::Star)));
        assert_eq!(ctl.history().stack(Surface::Front).len(), 3);
        assert!(!ctl.has_pending_edits());
    }

    #[test]
    fn test_product_type_switch_falls_back_to_front() {
        let mut ctl = controller(ProductType::TShirt);
        ctl.set_active_surface(Surface::Back);
        ctl.add_text().unwrap();

        ctl.apply_config(&ConfigCommand::SetProductType {
            product_type: ProductType::Tumbler,
        })
        .unwrap();

        assert_eq!(ctl.active_surface(), Surface::Front);
        assert_eq!(ctl.selected_element_id(), None);
        assert_eq!(ctl.config().surfaces().len(), 1);
        // Back elements survive in the document
        assert_eq!(ctl.elements(Surface::Back).len(), 1);
        assert!(ctl.set_active_surface(Surface::Left));
    }

    #[test]
    fn test_deactivating_active_surface_moves_to_remaining_surface() {
        let mut ctl = controller(ProductType::TShirt);
        ctl.set_active_surface(Surface::Back);
        ctl.add_text().unwrap();

        ctl.apply_config(&ConfigCommand::SetSurfaceActive {
            surface: Surface::Back,
            active: false,
        })
        .unwrap();

        assert_eq!(ctl.active_surface(), Surface::Front);
        assert_eq!(ctl.selected_element_id(), None);
        assert!(!ctl.config().is_multi_surface());

        ctl.add_text().unwrap();
        assert_eq!(ctl.elements(Surface::Front).len(), 1);
        assert_eq!(ctl.elements(Surface::Back).len(), 1);
        assert!(ctl.config().surfaces().contains(ctl.active_surface()));
    }

    #[test]
    fn test_config_commands_route_through_validation() {
        let mut ctl = controller(ProductType::CoffeeMug);
        assert!(ctl
            .apply_config(&ConfigCommand::SetColor {
                color: "Red".to_string()
            })
            .is_err());
        ctl.apply_config(&ConfigCommand::SetMaterial {
            material: Material::PolyesterSublimation,
        })
        .unwrap();
        assert_eq!(ctl.config().material(), Material::PolyesterSublimation);
    }

    #[test]
    fn test_snapshot_commits_pending() {
        let mut ctl = controller(ProductType::TShirt);
        ctl.add_text().unwrap();
        ctl.update_selected(&ElementPatch::new().content("HELLO"));

        let document = ctl.snapshot();
        assert_eq!(document[Surface::Front][0].as_text().unwrap().content, "HELLO");
        assert!(!ctl.has_pending_edits());
    }
}
