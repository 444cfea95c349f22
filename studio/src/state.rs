//! Studio session state

use anyhow::{anyhow, Result};
use canvas_engine::{ControllerOptions, DesignController};
use design_model::{Catalog, ProductType};
use pricing::{Cart, FlatRateShipping, ShippingQuoteProvider, SimulatedShipping};
use render_model::{ImageExportProvider, PlaceholderExport, SurfaceRenderer};
use std::sync::Arc;
use store::{ShippingSettings, StudioSettings};

const NO_DESIGN: &str = "no product is open; start with open_product";

/// Everything one customer session touches: the open design, the cart,
/// and the injected checkout collaborators
pub struct StudioSession {
    pub catalog: Arc<Catalog>,
    pub settings: StudioSettings,
    pub cart: Cart,
    pub renderer: SurfaceRenderer,
    pub shipping: Box<dyn ShippingQuoteProvider>,
    pub exporter: Box<dyn ImageExportProvider>,
    design: Option<DesignController>,
}

impl StudioSession {
    pub fn new(catalog: Arc<Catalog>, settings: StudioSettings) -> Self {
        let shipping: Box<dyn ShippingQuoteProvider> = match settings.checkout.shipping {
            ShippingSettings::Simulated { seed: Some(seed) } => {
                Box::new(SimulatedShipping::with_seed(seed))
            }
            ShippingSettings::Simulated { seed: None } => Box::new(SimulatedShipping::new()),
            ShippingSettings::FlatRate { rate } => Box::new(FlatRateShipping::new(rate)),
        };
        let exporter = Box::new(PlaceholderExport::new(
            settings.export.preview_url.clone(),
            settings.export.file_prefix.clone(),
        ));

        Self {
            catalog,
            cart: Cart::with_tax_rate(settings.checkout.tax_rate),
            renderer: SurfaceRenderer::default(),
            shipping,
            exporter,
            design: None,
            settings,
        }
    }

    /// Open a fresh design canvas, discarding any design in progress
    pub fn open(&mut self, product_type: ProductType) -> &mut DesignController {
        let editing = &self.settings.editing;
        let options = ControllerOptions {
            history_limit: editing.history_limit,
            default_zoom: editing.default_zoom,
            text_defaults: editing.text_defaults.clone(),
        };
        tracing::info!("Opening design canvas for {}", product_type);
        self.design.insert(DesignController::with_options(
            Arc::clone(&self.catalog),
            product_type,
            options,
        ))
    }

    pub fn design(&self) -> Option<&DesignController> {
        self.design.as_ref()
    }

    /// The open design, or an error if no product has been opened yet
    pub fn require_design(&self) -> Result<&DesignController> {
        self.design.as_ref().ok_or_else(|| anyhow!(NO_DESIGN))
    }

    pub fn design_mut(&mut self) -> Result<&mut DesignController> {
        self.design.as_mut().ok_or_else(|| anyhow!(NO_DESIGN))
    }
}
