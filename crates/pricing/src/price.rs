//! Price derivation from a product configuration

use design_model::{Material, ProductConfiguration};
use serde::{Deserialize, Serialize};

/// Flat surcharge for sublimation printing on polyester
pub const POLYESTER_SURCHARGE: f64 = 8.0;

/// Multiplier applied when more than one surface is printed
pub const MULTI_SURFACE_MULTIPLIER: f64 = 1.5;

/// How a configuration's price was derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Catalog base price of the product type
    pub base: f64,
    /// Material surcharge added to the base
    pub material_surcharge: f64,
    /// Multiplier applied after the surcharge (1.0 for a single surface)
    pub surface_multiplier: f64,
    /// Full-precision total
    pub total: f64,
}

impl PriceBreakdown {
    /// Derive the breakdown for a configuration.
    ///
    /// The surcharge is added before the multi-surface multiplier is applied.
    pub fn for_config(config: &ProductConfiguration) -> Self {
        let base = config.base_price();
        let material_surcharge = match config.material() {
            Material::PolyesterSublimation => POLYESTER_SURCHARGE,
            Material::Cotton => 0.0,
        };
        let surface_multiplier = if config.is_multi_surface() {
            MULTI_SURFACE_MULTIPLIER
        } else {
            1.0
        };

        Self {
            base,
            material_surcharge,
            surface_multiplier,
            total: (base + material_surcharge) * surface_multiplier,
        }
    }
}

/// Compute the full-precision price of a configuration
pub fn compute_price(config: &ProductConfiguration) -> f64 {
    PriceBreakdown::for_config(config).total
}

/// Format a price for display with two decimals
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_model::{Catalog, ProductType, Surface};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn shirt(material: Material, two_surfaces: bool) -> ProductConfiguration {
        let catalog = Catalog::default();
        let mut config = ProductConfiguration::new(&catalog, ProductType::TShirt);
        config.set_material(material);
        if two_surfaces {
            config
                .set_surface_active(&catalog, Surface::Back, true)
                .unwrap();
        }
        config
    }

    #[test]
    fn test_single_surface_cotton() {
        assert_close(compute_price(&shirt(Material::Cotton, false)), 19.99);
    }

    #[test]
    fn test_polyester_surcharge() {
        assert_close(
            compute_price(&shirt(Material::PolyesterSublimation, false)),
            27.99,
        );
    }

    #[test]
    fn test_multi_surface_multiplier() {
        assert_close(compute_price(&shirt(Material::Cotton, true)), 29.985);
    }

    #[test]
    fn test_surcharge_applies_before_multiplier() {
        let breakdown = PriceBreakdown::for_config(&shirt(Material::PolyesterSublimation, true));
        assert_eq!(breakdown.material_surcharge, POLYESTER_SURCHARGE);
        assert_eq!(breakdown.surface_multiplier, MULTI_SURFACE_MULTIPLIER);
        assert_close(breakdown.total, 41.985);
    }

    #[test]
    fn test_base_price_follows_product_type() {
        let catalog = Catalog::default();
        let mug = ProductConfiguration::new(&catalog, ProductType::CoffeeMug);
        assert_close(compute_price(&mug), 12.99);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(19.99), "19.99");
        assert_eq!(format_price(27.5), "27.50");
        assert_eq!(format_price(0.0), "0.00");
    }
}
