//! Typed product configuration commands
//!
//! Configuration changes go through these commands instead of free-form
//! field writes, so a configuration can never hold a color, size, or
//! surface that its product type does not offer.

use crate::Result;
use design_model::{Catalog, Material, ProductConfiguration, ProductType, Surface};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ConfigCommand {
    /// Switch product type, repairing color, size, and surfaces as needed
    SetProductType { product_type: ProductType },
    SetColor { color: String },
    SetSize { size: String },
    SetMaterial { material: Material },
    /// Mark a surface as printed or not
    SetSurfaceActive { surface: Surface, active: bool },
}

impl ConfigCommand {
    /// Apply this command to a configuration.
    ///
    /// On error the configuration is left unchanged.
    pub fn apply(&self, config: &mut ProductConfiguration, catalog: &Catalog) -> Result<()> {
        match self {
            ConfigCommand::SetProductType { product_type } => {
                config.set_product_type(catalog, *product_type);
            }
            ConfigCommand::SetColor { color } => config.set_color(catalog, color)?,
            ConfigCommand::SetSize { size } => config.set_size(catalog, size)?,
            ConfigCommand::SetMaterial { material } => config.set_material(*material),
            ConfigCommand::SetSurfaceActive { surface, active } => {
                config.set_surface_active(catalog, *surface, *active)?;
            }
        }
        Ok(())
    }

    /// Get a display name for this command
    pub fn display_name(&self) -> &str {
        match self {
            ConfigCommand::SetProductType { .. } => "Set Product Type",
            ConfigCommand::SetColor { .. } => "Set Color",
            ConfigCommand::SetSize { .. } => "Set Size",
            ConfigCommand::SetMaterial { .. } => "Set Material",
            ConfigCommand::SetSurfaceActive { .. } => "Set Surface Active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditError;
    use design_model::DesignModelError;

    #[test]
    fn test_set_color_validates_against_category() {
        let catalog = Catalog::default();
        let mut config = ProductConfiguration::new(&catalog, ProductType::ToteBag);

        let err = ConfigCommand::SetColor {
            color: "Purple".to_string(),
        }
        .apply(&mut config, &catalog)
        .unwrap_err();
        assert!(matches!(
            err,
            EditError::DesignModel(DesignModelError::InvalidColor { .. })
        ));
        assert_eq!(config.color(), "Beige");

        ConfigCommand::SetColor {
            color: "Gray".to_string(),
        }
        .apply(&mut config, &catalog)
        .unwrap();
        assert_eq!(config.color(), "Gray");
    }

    #[test]
    fn test_set_material() {
        let catalog = Catalog::default();
        let mut config = ProductConfiguration::new(&catalog, ProductType::Hoodie);
        ConfigCommand::SetMaterial {
            material: Material::PolyesterSublimation,
        }
        .apply(&mut config, &catalog)
        .unwrap();
        assert_eq!(config.material(), Material::PolyesterSublimation);
    }

    #[test]
    fn test_set_surface_active_rejects_illegal_surface() {
        let catalog = Catalog::default();
        let mut config = ProductConfiguration::new(&catalog, ProductType::TShirt);
        let result = ConfigCommand::SetSurfaceActive {
            surface: Surface::Right,
            active: true,
        }
        .apply(&mut config, &catalog);
        assert!(result.is_err());
        assert_eq!(config.surfaces().len(), 1);
    }

    #[test]
    fn test_command_deserializes_from_tagged_json() {
        let command: ConfigCommand =
            serde_json::from_str(r#"{"command":"set_product_type","product_type":"Tumbler"}"#)
                .unwrap();
        assert_eq!(
            command,
            ConfigCommand::SetProductType {
                product_type: ProductType::Tumbler
            }
        );
        assert_eq!(command.display_name(), "Set Product Type");
    }
}
