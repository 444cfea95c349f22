//! Static catalog tables
//!
//! The catalog lists, per product type, which surfaces can be printed, the
//! sizes on offer, the base price, and the defaults used when a design is
//! started. Palettes are shared per [`ColorCategory`]. A catalog can be
//! loaded from JSON; loading validates every table so lookups never miss.

use crate::{ColorCategory, DesignModelError, ProductType, Result, Surface};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A named color with its `#RRGGBB` value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub name: String,
    pub hex: String,
}

impl ColorSwatch {
    fn new(name: &str, hex: &str) -> Self {
        Self {
            name: name.to_string(),
            hex: hex.to_string(),
        }
    }
}

/// Catalog entry for one product type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub product_type: ProductType,
    /// Surfaces that can be printed on this product
    pub surfaces: Vec<Surface>,
    pub sizes: Vec<String>,
    pub default_color: String,
    pub default_size: String,
    pub base_price: f64,
    /// Mockup photo drawn behind the design
    pub mockup_url: String,
}

/// A ready-made design offered in the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Palette for one color category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub category: ColorCategory,
    pub swatches: Vec<ColorSwatch>,
}

/// On-disk shape of a catalog, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<ProductSpec>,
    pub palettes: Vec<Palette>,
    pub fonts: Vec<String>,
    pub gallery: Vec<GalleryItem>,
}

/// Validated catalog with one entry per product type and color category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    products: [ProductSpec; 5],
    palettes: [Vec<ColorSwatch>; 3],
    fonts: Vec<String>,
    gallery: Vec<GalleryItem>,
}

/// Check a string is a `#RRGGBB` color
pub fn is_hex_color(value: &str) -> bool {
    static HEX: OnceLock<Option<Regex>> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

impl Catalog {
    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| DesignModelError::InvalidCatalog(e.to_string()))?;
        Self::try_from(file)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DesignModelError::InvalidCatalog(e.to_string()))
    }

    pub fn product(&self, product_type: ProductType) -> &ProductSpec {
        &self.products[product_type.index()]
    }

    pub fn products(&self) -> &[ProductSpec] {
        &self.products
    }

    pub fn palette(&self, category: ColorCategory) -> &[ColorSwatch] {
        &self.palettes[category.index()]
    }

    /// Colors offered for a product type
    pub fn colors_for(&self, product_type: ProductType) -> &[ColorSwatch] {
        self.palette(product_type.color_category())
    }

    /// Look up a color by name in the product type's palette
    pub fn swatch(&self, product_type: ProductType, name: &str) -> Option<&ColorSwatch> {
        self.colors_for(product_type).iter().find(|s| s.name == name)
    }

    pub fn sizes(&self, product_type: ProductType) -> &[String] {
        &self.product(product_type).sizes
    }

    pub fn legal_surfaces(&self, product_type: ProductType) -> &[Surface] {
        &self.product(product_type).surfaces
    }

    pub fn is_legal_surface(&self, product_type: ProductType, surface: Surface) -> bool {
        self.legal_surfaces(product_type).contains(&surface)
    }

    pub fn base_price(&self, product_type: ProductType) -> f64 {
        self.product(product_type).base_price
    }

    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        &self.gallery
    }

    pub fn gallery_item(&self, id: &str) -> Result<&GalleryItem> {
        self.gallery
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| DesignModelError::UnknownGalleryItem(id.to_string()))
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = DesignModelError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        let mut palettes: Vec<Vec<ColorSwatch>> = Vec::with_capacity(ColorCategory::ALL.len());
        for category in ColorCategory::ALL {
            let palette = file
                .palettes
                .iter()
                .find(|p| p.category == category)
                .ok_or_else(|| invalid(format!("missing palette for {:?}", category)))?;
            if palette.swatches.is_empty() {
                return Err(invalid(format!("palette for {:?} is empty", category)));
            }
            if let Some(bad) = palette.swatches.iter().find(|s| !is_hex_color(&s.hex)) {
                return Err(invalid(format!("color '{}' has bad hex '{}'", bad.name, bad.hex)));
            }
            palettes.push(palette.swatches.clone());
        }

        let mut products: Vec<ProductSpec> = Vec::with_capacity(ProductType::ALL.len());
        for product_type in ProductType::ALL {
            let spec = file
                .products
                .iter()
                .find(|p| p.product_type == product_type)
                .ok_or_else(|| invalid(format!("missing product {}", product_type)))?;
            validate_product(spec, &palettes[product_type.color_category().index()])?;
            products.push(spec.clone());
        }

        if file.fonts.is_empty() {
            return Err(invalid("font list is empty".to_string()));
        }

        let products: [ProductSpec; 5] = products
            .try_into()
            .map_err(|_| invalid("product table has wrong length".to_string()))?;
        let palettes: [Vec<ColorSwatch>; 3] = palettes
            .try_into()
            .map_err(|_| invalid("palette table has wrong length".to_string()))?;

        Ok(Self {
            products,
            palettes,
            fonts: file.fonts,
            gallery: file.gallery,
        })
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        let [apparel, tote, ceramic] = catalog.palettes;
        Self {
            products: catalog.products.into_iter().collect(),
            palettes: vec![
                Palette {
                    category: ColorCategory::Apparel,
                    swatches: apparel,
                },
                Palette {
                    category: ColorCategory::Tote,
                    swatches: tote,
                },
                Palette {
                    category: ColorCategory::Ceramic,
                    swatches: ceramic,
                },
            ],
            fonts: catalog.fonts,
            gallery: catalog.gallery,
        }
    }
}

fn invalid(message: String) -> DesignModelError {
    DesignModelError::InvalidCatalog(message)
}

fn validate_product(spec: &ProductSpec, palette: &[ColorSwatch]) -> Result<()> {
    let name = spec.product_type;
    if !spec.surfaces.contains(&Surface::Front) {
        return Err(invalid(format!("{} must offer the Front surface", name)));
    }
    if !spec.sizes.contains(&spec.default_size) {
        return Err(invalid(format!(
            "{} default size '{}' is not in its size list",
            name, spec.default_size
        )));
    }
    if !palette.iter().any(|s| s.name == spec.default_color) {
        return Err(invalid(format!(
            "{} default color '{}' is not in its palette",
            name, spec.default_color
        )));
    }
    if !spec.base_price.is_finite() || spec.base_price < 0.0 {
        return Err(invalid(format!("{} has an invalid base price", name)));
    }
    Ok(())
}

fn product(
    product_type: ProductType,
    surfaces: &[Surface],
    sizes: Vec<String>,
    default_color: &str,
    default_size: &str,
    base_price: f64,
    mockup_url: &str,
) -> ProductSpec {
    ProductSpec {
        product_type,
        surfaces: surfaces.to_vec(),
        sizes,
        default_color: default_color.to_string(),
        default_size: default_size.to_string(),
        base_price,
        mockup_url: mockup_url.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for Catalog {
    fn default() -> Self {
        let apparel_sizes = strings(&["S", "M", "L", "XL", "XXL", "Custom/Special"]);
        let apparel_surfaces = vec![Surface::Front, Surface::Back];
        let drinkware_surfaces = vec![Surface::Front, Surface::Left, Surface::Right];

        let products = [
            product(
                ProductType::TShirt,
                &apparel_surfaces,
                apparel_sizes.clone(),
                "Black",
                "M",
                19.99,
                "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?auto=format&fit=crop&q=80&w=800",
            ),
            product(
                ProductType::Hoodie,
                &apparel_surfaces,
                apparel_sizes.clone(),
                "Black",
                "M",
                19.99,
                "https://images.unsplash.com/photo-1556821840-3a63f95609a7?auto=format&fit=crop&q=80&w=800",
            ),
            product(
                ProductType::ToteBag,
                &apparel_surfaces,
                apparel_sizes,
                "Beige",
                "M",
                14.99,
                "https://images.unsplash.com/photo-1544816153-199d821c1bb6?auto=format&fit=crop&q=80&w=800",
            ),
            product(
                ProductType::CoffeeMug,
                &drinkware_surfaces,
                strings(&["11oz", "15oz"]),
                "White",
                "11oz",
                12.99,
                "https://images.unsplash.com/photo-1514228742587-6b1558fbed20?auto=format&fit=crop&q=80&w=800",
            ),
            product(
                ProductType::Tumbler,
                &drinkware_surfaces,
                strings(&["20oz", "30oz"]),
                "White",
                "20oz",
                24.99,
                "https://images.unsplash.com/photo-1594913310034-ec1a5814be95?auto=format&fit=crop&q=80&w=800",
            ),
        ];

        let apparel = vec![
            ColorSwatch::new("Light Blue", "#ADD8E6"),
            ColorSwatch::new("Navy Blue", "#000080"),
            ColorSwatch::new("Red", "#FF0000"),
            ColorSwatch::new("Green", "#008000"),
            ColorSwatch::new("Orange", "#FFA500"),
            ColorSwatch::new("Pink", "#FFC0CB"),
            ColorSwatch::new("White", "#FFFFFF"),
            ColorSwatch::new("Yellow", "#FFFF00"),
            ColorSwatch::new("Purple", "#800080"),
            ColorSwatch::new("Black", "#000000"),
        ];
        let tote = vec![
            ColorSwatch::new("White", "#FFFFFF"),
            ColorSwatch::new("Beige", "#F5F5DC"),
            ColorSwatch::new("Yellow", "#FFFF00"),
            ColorSwatch::new("Gray", "#808080"),
        ];
        let ceramic = vec![ColorSwatch::new("White", "#FFFFFF")];

        let gallery = [
            ("g1", "Vintage Logo", "https://picsum.photos/seed/design1/200/200"),
            ("g2", "Abstract Art", "https://picsum.photos/seed/design2/200/200"),
            ("g3", "Modern Text", "https://picsum.photos/seed/design3/200/200"),
            ("g4", "Nature Vibes", "https://picsum.photos/seed/design4/200/200"),
        ]
        .iter()
        .map(|(id, name, url)| GalleryItem {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect();

        Self {
            products,
            palettes: [apparel, tote, ceramic],
            fonts: strings(&[
                "Inter",
                "Playfair Display",
                "Bangers",
                "Permanent Marker",
                "Roboto Mono",
            ]),
            gallery,
        }
    }
}
