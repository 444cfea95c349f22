//! Scripted studio actions
//!
//! A script is a JSON array of actions replayed in order against one
//! session. Failed actions are recorded and the script keeps going, the
//! same way a button press that fails leaves the page usable.

use crate::state::StudioSession;
use anyhow::{bail, Context, Result};
use canvas_engine::ConfigCommand;
use design_model::{ElementPatch, Material, ProductType, Surface};
use pricing::{compute_price, finalize_for_cart, format_price, CartTotals};
use render_model::{ExportedImage, RenderFrame};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One user gesture in a scripted session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StudioAction {
    /// Enter the design canvas for a product
    OpenProduct { product_type: ProductType },
    AddText,
    AddImage { content_ref: String },
    AddFromGallery { gallery_id: String },
    /// Select by z-order position on the active surface; omit to clear
    Select { index: Option<usize> },
    /// Continuous edit, e.g. one step of a slider drag
    UpdateSelected { patch: ElementPatch },
    EndGesture,
    /// Discrete edit, committed immediately
    ApplyToSelected { patch: ElementPatch },
    DeleteSelected,
    SetSurface { surface: Surface },
    Undo,
    Redo,
    /// Product configuration change (color, size, material, surfaces, type)
    Configure(ConfigCommand),
    SetZoom { zoom: f64 },
    ZoomIn,
    ZoomOut,
    /// Draw the active surface
    Render,
    Export,
    AddToCart,
    /// Remove a cart line by position
    RemoveFromCart { index: usize },
    QuoteShipping { postal_code: String },
}

impl StudioAction {
    /// Get a display name for this action
    pub fn display_name(&self) -> &str {
        match self {
            StudioAction::OpenProduct { .. } => "Open Product",
            StudioAction::AddText => "Add Text",
            StudioAction::AddImage { .. } => "Add Image",
            StudioAction::AddFromGallery { .. } => "Add From Gallery",
            StudioAction::Select { .. } => "Select",
            StudioAction::UpdateSelected { .. } => "Update Selected",
            StudioAction::EndGesture => "End Gesture",
            StudioAction::ApplyToSelected { .. } => "Apply To Selected",
            StudioAction::DeleteSelected => "Delete Selected",
            StudioAction::SetSurface { .. } => "Set Surface",
            StudioAction::Undo => "Undo",
            StudioAction::Redo => "Redo",
            StudioAction::Configure(command) => command.display_name(),
            StudioAction::SetZoom { .. } => "Set Zoom",
            StudioAction::ZoomIn => "Zoom In",
            StudioAction::ZoomOut => "Zoom Out",
            StudioAction::Render => "Render",
            StudioAction::Export => "Export",
            StudioAction::AddToCart => "Add To Cart",
            StudioAction::RemoveFromCart { .. } => "Remove From Cart",
            StudioAction::QuoteShipping { .. } => "Quote Shipping",
        }
    }
}

/// Something an action produced for the caller
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum ActionOutput {
    Frame(RenderFrame),
    Export(ExportedImage),
    ShippingQuote { postal_code: String, cost: f64 },
}

/// Apply one action to the session
pub fn apply_action(session: &mut StudioSession, action: &StudioAction) -> Result<Option<ActionOutput>> {
    match action {
        StudioAction::OpenProduct { product_type } => {
            session.open(*product_type);
        }
        StudioAction::AddText => {
            session.design_mut()?.add_text()?;
        }
        StudioAction::AddImage { content_ref } => {
            session.design_mut()?.add_image(content_ref.as_str())?;
        }
        StudioAction::AddFromGallery { gallery_id } => {
            session.design_mut()?.add_from_gallery(gallery_id)?;
        }
        StudioAction::Select { index } => {
            let design = session.design_mut()?;
            let id = match index {
                Some(index) => match design.active_elements().get(*index) {
                    Some(element) => Some(element.id()),
                    None => bail!("no element at position {index} on {}", design.active_surface()),
                },
                None => None,
            };
            design.select_element(id);
        }
        StudioAction::UpdateSelected { patch } => {
            session.design_mut()?.update_selected(patch);
        }
        StudioAction::EndGesture => session.design_mut()?.end_gesture(),
        StudioAction::ApplyToSelected { patch } => {
            session.design_mut()?.apply_to_selected(patch);
        }
        StudioAction::DeleteSelected => {
            session.design_mut()?.delete_selected();
        }
        StudioAction::SetSurface { surface } => {
            session.design_mut()?.set_active_surface(*surface);
        }
        StudioAction::Undo => {
            session.design_mut()?.undo()?;
        }
        StudioAction::Redo => {
            session.design_mut()?.redo()?;
        }
        StudioAction::Configure(command) => session.design_mut()?.apply_config(command)?,
        StudioAction::SetZoom { zoom } => session.design_mut()?.set_zoom(*zoom),
        StudioAction::ZoomIn => {
            let design = session.design_mut()?;
            design.set_zoom(design.zoom().zoom_in().value());
        }
        StudioAction::ZoomOut => {
            let design = session.design_mut()?;
            design.set_zoom(design.zoom().zoom_out().value());
        }
        StudioAction::Render => {
            return Ok(Some(ActionOutput::Frame(render_active(session)?)));
        }
        StudioAction::Export => {
            let frame = render_active(session)?;
            let design = session.require_design()?;
            let image = session.exporter.export(&frame, design.config())?;
            return Ok(Some(ActionOutput::Export(image)));
        }
        StudioAction::AddToCart => {
            let design = session.design_mut()?;
            let document = design.snapshot();
            let item = finalize_for_cart(design.config(), &document);
            session.cart.add(item);
        }
        StudioAction::RemoveFromCart { index } => {
            let id = session
                .cart
                .items()
                .get(*index)
                .map(|item| item.id())
                .with_context(|| format!("no cart line at position {index}"))?;
            session.cart.remove(id);
        }
        StudioAction::QuoteShipping { postal_code } => {
            let cost = session
                .cart
                .quote_shipping(&mut *session.shipping, postal_code)?;
            return Ok(Some(ActionOutput::ShippingQuote {
                postal_code: postal_code.trim().to_string(),
                cost,
            }));
        }
    }
    Ok(None)
}

fn render_active(session: &StudioSession) -> Result<RenderFrame> {
    let design = session.require_design()?;
    Ok(session.renderer.render(
        design.config(),
        design.catalog(),
        design.active_surface(),
        design.active_elements(),
        design.selected_element_id(),
        design.zoom().value(),
    ))
}

/// An action that failed, by position in the script
#[derive(Debug, Clone, Serialize)]
pub struct ActionFailure {
    pub index: usize,
    pub action: String,
    pub message: String,
}

/// The open product as priced right now
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub product_type: ProductType,
    pub color: String,
    pub size: String,
    pub material: Material,
    pub surfaces: Vec<Surface>,
    pub price: f64,
    pub price_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: String,
    pub product_type: ProductType,
    pub color: String,
    pub size: String,
    pub elements: usize,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub total_display: String,
}

/// Final state of a scripted session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub product: Option<ProductSummary>,
    pub active_surface: Option<Surface>,
    pub element_counts: BTreeMap<Surface, usize>,
    pub zoom: Option<f64>,
    pub cart: CartSummary,
    pub outputs: Vec<ActionOutput>,
    pub failures: Vec<ActionFailure>,
}

/// Replay a script against a session and summarize the result
pub fn run_script(session: &mut StudioSession, actions: &[StudioAction]) -> SessionSummary {
    let mut outputs = Vec::new();
    let mut failures = Vec::new();

    for (index, action) in actions.iter().enumerate() {
        tracing::debug!("Action {}: {}", index, action.display_name());
        match apply_action(session, action) {
            Ok(Some(output)) => outputs.push(output),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Action {} ({}) failed: {:#}", index, action.display_name(), e);
                failures.push(ActionFailure {
                    index,
                    action: action.display_name().to_string(),
                    message: format!("{e:#}"),
                });
            }
        }
    }

    summarize(session, outputs, failures)
}

fn summarize(
    session: &StudioSession,
    outputs: Vec<ActionOutput>,
    failures: Vec<ActionFailure>,
) -> SessionSummary {
    let design = session.design();

    let product = design.map(|design| {
        let config = design.config();
        let price = compute_price(config);
        ProductSummary {
            product_type: config.product_type(),
            color: config.color().to_string(),
            size: config.size().to_string(),
            material: config.material(),
            surfaces: config.surfaces().iter().collect(),
            price,
            price_display: format_price(price),
        }
    });

    let element_counts: BTreeMap<Surface, usize> = design
        .map(|design| {
            design
                .document()
                .iter()
                .map(|(surface, elements)| (surface, elements.len()))
                .collect()
        })
        .unwrap_or_default();

    let lines: Vec<CartLine> = session
        .cart
        .items()
        .iter()
        .map(|item| CartLine {
            id: item.id().to_string(),
            product_type: item.config().product_type(),
            color: item.config().color().to_string(),
            size: item.config().size().to_string(),
            elements: item.design().iter().map(|(_, elements)| elements.len()).sum(),
            price: item.total_price(),
        })
        .collect();
    let totals = session.cart.totals();

    SessionSummary {
        product,
        active_surface: design.map(|design| design.active_surface()),
        element_counts,
        zoom: design.map(|design| design.zoom().value()),
        cart: CartSummary {
            lines,
            totals,
            total_display: format_price(totals.total),
        },
        outputs,
        failures,
    }
}
