//! Product types, materials, and the product configuration
//!
//! A [`ProductConfiguration`] can only be changed through its validated
//! setters, so it never holds a color, size, or surface that the catalog
//! does not offer for its product type.

use crate::{Catalog, DesignModelError, Result, Surface, SurfaceSet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of blank product being customized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "T-Shirt")]
    TShirt,
    Hoodie,
    #[serde(rename = "Tote Bag")]
    ToteBag,
    #[serde(rename = "Coffee Mug")]
    CoffeeMug,
    Tumbler,
}

impl ProductType {
    pub const ALL: [ProductType; 5] = [
        ProductType::TShirt,
        ProductType::Hoodie,
        ProductType::ToteBag,
        ProductType::CoffeeMug,
        ProductType::Tumbler,
    ];

    /// Position of this type in per-type catalog tables
    pub fn index(self) -> usize {
        match self {
            ProductType::TShirt => 0,
            ProductType::Hoodie => 1,
            ProductType::ToteBag => 2,
            ProductType::CoffeeMug => 3,
            ProductType::Tumbler => 4,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProductType::TShirt => "T-Shirt",
            ProductType::Hoodie => "Hoodie",
            ProductType::ToteBag => "Tote Bag",
            ProductType::CoffeeMug => "Coffee Mug",
            ProductType::Tumbler => "Tumbler",
        }
    }

    /// Lowercase, hyphenated name for file names
    pub fn slug(self) -> &'static str {
        match self {
            ProductType::TShirt => "t-shirt",
            ProductType::Hoodie => "hoodie",
            ProductType::ToteBag => "tote-bag",
            ProductType::CoffeeMug => "coffee-mug",
            ProductType::Tumbler => "tumbler",
        }
    }

    /// Which palette this product draws its colors from
    pub fn color_category(self) -> ColorCategory {
        match self {
            ProductType::TShirt | ProductType::Hoodie => ColorCategory::Apparel,
            ProductType::ToteBag => ColorCategory::Tote,
            ProductType::CoffeeMug | ProductType::Tumbler => ColorCategory::Ceramic,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Palette family shared by several product types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorCategory {
    Apparel,
    Tote,
    Ceramic,
}

impl ColorCategory {
    pub const ALL: [ColorCategory; 3] = [
        ColorCategory::Apparel,
        ColorCategory::Tote,
        ColorCategory::Ceramic,
    ];

    pub fn index(self) -> usize {
        match self {
            ColorCategory::Apparel => 0,
            ColorCategory::Tote => 1,
            ColorCategory::Ceramic => 2,
        }
    }
}

/// Print material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Cotton,
    #[serde(rename = "Polyester (Sublimation)")]
    PolyesterSublimation,
}

impl Material {
    pub const ALL: [Material; 2] = [Material::Cotton, Material::PolyesterSublimation];

    pub fn display_name(self) -> &'static str {
        match self {
            Material::Cotton => "Cotton",
            Material::PolyesterSublimation => "Polyester (Sublimation)",
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::Cotton
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identity of a product configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationId(Uuid);

impl ConfigurationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConfigurationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The product being designed: type, color, size, material, and the
/// surfaces that will be printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfiguration {
    id: ConfigurationId,
    product_type: ProductType,
    color: String,
    size: String,
    material: Material,
    surfaces: SurfaceSet,
    base_price: f64,
}

impl ProductConfiguration {
    /// Create the default configuration for a product type: catalog default
    /// color and size, cotton, Front only.
    pub fn new(catalog: &Catalog, product_type: ProductType) -> Self {
        let spec = catalog.product(product_type);
        Self {
            id: ConfigurationId::new(),
            product_type,
            color: spec.default_color.clone(),
            size: spec.default_size.clone(),
            material: Material::Cotton,
            surfaces: SurfaceSet::single(Surface::Front),
            base_price: spec.base_price,
        }
    }

    pub fn id(&self) -> ConfigurationId {
        self.id
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn surfaces(&self) -> &SurfaceSet {
        &self.surfaces
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Switch to another product type.
    ///
    /// Base price follows the new type. Color and size fall back to the new
    /// type's defaults when the current ones are not offered for it, and
    /// surfaces the new type cannot print are dropped. Front is added back if
    /// no surface remains.
    pub fn set_product_type(&mut self, catalog: &Catalog, product_type: ProductType) {
        let spec = catalog.product(product_type);
        self.product_type = product_type;
        self.base_price = spec.base_price;

        if catalog.swatch(product_type, &self.color).is_none() {
            self.color = spec.default_color.clone();
        }
        if !spec.sizes.iter().any(|s| *s == self.size) {
            self.size = spec.default_size.clone();
        }

        self.surfaces.retain(|s| spec.surfaces.contains(&s));
        if self.surfaces.is_empty() {
            self.surfaces.insert(Surface::Front);
        }
    }

    pub fn set_color(&mut self, catalog: &Catalog, color: &str) -> Result<()> {
        if catalog.swatch(self.product_type, color).is_none() {
            return Err(DesignModelError::InvalidColor {
                color: color.to_string(),
                product_type: self.product_type,
            });
        }
        self.color = color.to_string();
        Ok(())
    }

    pub fn set_size(&mut self, catalog: &Catalog, size: &str) -> Result<()> {
        if !catalog.sizes(self.product_type).iter().any(|s| s == size) {
            return Err(DesignModelError::InvalidSize {
                size: size.to_string(),
                product_type: self.product_type,
            });
        }
        self.size = size.to_string();
        Ok(())
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Mark a surface as printed or not.
    ///
    /// Returns whether the set changed. Deactivating the last surface fails.
    pub fn set_surface_active(
        &mut self,
        catalog: &Catalog,
        surface: Surface,
        active: bool,
    ) -> Result<bool> {
        if !catalog.is_legal_surface(self.product_type, surface) {
            return Err(DesignModelError::InvalidSurface {
                surface,
                product_type: self.product_type,
            });
        }

        if active {
            return Ok(self.surfaces.insert(surface));
        }

        if self.surfaces.len() == 1 && self.surfaces.contains(surface) {
            return Err(DesignModelError::EmptySurfaceSet);
        }
        Ok(self.surfaces.remove(surface))
    }

    /// True when more than one surface is printed
    pub fn is_multi_surface(&self) -> bool {
        self.surfaces.len() > 1
    }

    /// Check the configuration against the catalog (useful after deserializing)
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        if catalog.swatch(self.product_type, &self.color).is_none() {
            return Err(DesignModelError::InvalidColor {
                color: self.color.clone(),
                product_type: self.product_type,
            });
        }
        if !catalog.sizes(self.product_type).iter().any(|s| *s == self.size) {
            return Err(DesignModelError::InvalidSize {
                size: self.size.clone(),
                product_type: self.product_type,
            });
        }
        if self.surfaces.is_empty() {
            return Err(DesignModelError::EmptySurfaceSet);
        }
        if let Some(surface) = self
            .surfaces
            .iter()
            .find(|s| !catalog.is_legal_surface(self.product_type, *s))
        {
            return Err(DesignModelError::InvalidSurface {
                surface,
                product_type: self.product_type,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_product_type() {
        let catalog = Catalog::default();

        let shirt = ProductConfiguration::new(&catalog, ProductType::TShirt);
        assert_eq!(shirt.color(), "Black");
        assert_eq!(shirt.size(), "M");
        assert_eq!(shirt.base_price(), 19.99);
        assert_eq!(shirt.material(), Material::Cotton);
        assert_eq!(shirt.surfaces().iter().collect::<Vec<_>>(), vec![Surface::Front]);

        let tote = ProductConfiguration::new(&catalog, ProductType::ToteBag);
        assert_eq!(tote.color(), "Beige");
        assert_eq!(tote.base_price(), 14.99);

        let mug = ProductConfiguration::new(&catalog, ProductType::CoffeeMug);
        assert_eq!(mug.color(), "White");
        assert_eq!(mug.size(), "11oz");
        assert_eq!(mug.base_price(), 12.99);

        let tumbler = ProductConfiguration::new(&catalog, ProductType::Tumbler);
        assert_eq!(tumbler.size(), "20oz");
        assert_eq!(tumbler.base_price(), 24.99);

        for config in [shirt, tote, mug, tumbler] {
            config.validate(&catalog).unwrap();
        }
    }

    #[test]
    fn test_color_must_match_category() {
        let catalog = Catalog::default();
        let mut mug = ProductConfiguration::new(&catalog, ProductType::CoffeeMug);

        let err = mug.set_color(&catalog, "Navy Blue").unwrap_err();
        assert!(matches!(err, DesignModelError::InvalidColor { .. }));
        assert_eq!(mug.color(), "White");

        let mut hoodie = ProductConfiguration::new(&catalog, ProductType::Hoodie);
        hoodie.set_color(&catalog, "Navy Blue").unwrap();
        assert_eq!(hoodie.color(), "Navy Blue");
    }

    #[test]
    fn test_size_must_match_type() {
        let catalog = Catalog::default();
        let mut shirt = ProductConfiguration::new(&catalog, ProductType::TShirt);

        assert!(shirt.set_size(&catalog, "15oz").is_err());
        shirt.set_size(&catalog, "XXL").unwrap();
        assert_eq!(shirt.size(), "XXL");
    }

    #[test]
    fn test_surface_activation_rules() {
        let catalog = Catalog::default();
        let mut shirt = ProductConfiguration::new(&catalog, ProductType::TShirt);

        assert!(matches!(
            shirt.set_surface_active(&catalog, Surface::Left, true),
            Err(DesignModelError::InvalidSurface { .. })
        ));
        assert!(shirt.set_surface_active(&catalog, Surface::Back, true).unwrap());
        assert!(!shirt.set_surface_active(&catalog, Surface::Back, true).unwrap());
        assert!(shirt.is_multi_surface());

        assert!(shirt.set_surface_active(&catalog, Surface::Front, false).unwrap());
        assert!(matches!(
            shirt.set_surface_active(&catalog, Surface::Back, false),
            Err(DesignModelError::EmptySurfaceSet)
        ));
    }

    #[test]
    fn test_product_type_switch_repairs_configuration() {
        let catalog = Catalog::default();
        let mut config = ProductConfiguration::new(&catalog, ProductType::TShirt);
        config.set_color(&catalog, "Red").unwrap();
        config.set_size(&catalog, "XL").unwrap();
        config.set_surface_active(&catalog, Surface::Back, true).unwrap();

        config.set_product_type(&catalog, ProductType::CoffeeMug);
        assert_eq!(config.color(), "White");
        assert_eq!(config.size(), "11oz");
        assert_eq!(config.base_price(), 12.99);
        assert_eq!(config.surfaces().iter().collect::<Vec<_>>(), vec![Surface::Front]);
        config.validate(&catalog).unwrap();

        // White and XL survive a switch to tote
        let mut shirt = ProductConfiguration::new(&catalog, ProductType::TShirt);
        shirt.set_color(&catalog, "White").unwrap();
        shirt.set_size(&catalog, "XL").unwrap();
        shirt.set_product_type(&catalog, ProductType::ToteBag);
        assert_eq!(shirt.color(), "White");
        assert_eq!(shirt.size(), "XL");
    }

    #[test]
    fn test_product_type_switch_adds_front_only_when_nothing_remains() {
        let catalog = Catalog::default();
        let mut config = ProductConfiguration::new(&catalog, ProductType::TShirt);
        config.set_surface_active(&catalog, Surface::Back, true).unwrap();
        config.set_surface_active(&catalog, Surface::Front, false).unwrap();

        config.set_product_type(&catalog, ProductType::Hoodie);
        assert_eq!(config.surfaces().iter().collect::<Vec<_>>(), vec![Surface::Back]);

        config.set_product_type(&catalog, ProductType::Tumbler);
        assert_eq!(config.surfaces().iter().collect::<Vec<_>>(), vec![Surface::Front]);
    }

    #[test]
    fn test_product_type_serialized_names() {
        assert_eq!(serde_json::to_string(&ProductType::TShirt).unwrap(), "\"T-Shirt\"");
        assert_eq!(
            serde_json::to_string(&Material::PolyesterSublimation).unwrap(),
            "\"Polyester (Sublimation)\""
        );
        let parsed: ProductType = serde_json::from_str("\"Coffee Mug\"").unwrap();
        assert_eq!(parsed, ProductType::CoffeeMug);
    }
}
