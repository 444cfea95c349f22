//! Placeable design elements
//!
//! An element is either styled text or an image reference, placed on one
//! surface with a position, size, and rotation. Elements are only mutated
//! through [`ElementPatch`], which clamps every value into its editing range.

use crate::catalog::is_hex_color;
use crate::ElementId;
use serde::{Deserialize, Serialize};

/// Smallest width or height an element may have
pub const MIN_ELEMENT_SIZE: f64 = 20.0;
/// Largest width or height an element may have
pub const MAX_ELEMENT_SIZE: f64 = 400.0;
/// Arc bend limits for text (negative bends the other way)
pub const MIN_ARC: f64 = -180.0;
pub const MAX_ARC: f64 = 180.0;
/// Font size limits in points
pub const MIN_FONT_SIZE: f64 = 6.0;
pub const MAX_FONT_SIZE: f64 = 200.0;

/// Position, size, and rotation of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise, in [0, 360)
    pub rotation: f64,
}

impl Geometry {
    /// Create an unrotated geometry, clamping the size into range
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: clamp_dimension(width),
            height: clamp_dimension(height),
            rotation: 0.0,
        }
    }

    /// Centre point of the bounding box
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Clamp a width or height into the editing range
pub fn clamp_dimension(value: f64) -> f64 {
    value.clamp(MIN_ELEMENT_SIZE, MAX_ELEMENT_SIZE)
}

/// Wrap a rotation in degrees into [0, 360)
pub fn normalize_rotation(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clip mask applied to an image element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipShape {
    None,
    Star,
    Oval,
    Round,
    Square,
    Diamond,
    Tree,
}

impl ClipShape {
    pub const ALL: [ClipShape; 7] = [
        ClipShape::None,
        ClipShape::Star,
        ClipShape::Oval,
        ClipShape::Round,
        ClipShape::Square,
        ClipShape::Diamond,
        ClipShape::Tree,
    ];
}

impl Default for ClipShape {
    fn default() -> Self {
        Self::None
    }
}

/// Content and styling of a text element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub content: String,
    pub font_family: String,
    /// Font size in points
    pub font_size: f64,
    /// Fill color as `#RRGGBB`
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub shadow: bool,
    /// Extruded (3D) lettering
    pub extruded: bool,
    /// Baseline bend in [-180, 180]; zero is a straight baseline
    pub arc: f64,
}

/// Reference and mask of an image element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    /// Opaque reference to the image bytes (data URI or URL)
    pub content_ref: String,
    pub clip_shape: ClipShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextStyle),
    Image(ImageContent),
}

/// Defaults used when a new text element is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    pub geometry: Geometry,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            content: "YOUR TEXT HERE".to_string(),
            font_family: "Inter".to_string(),
            font_size: 32.0,
            color: "#FFFFFF".to_string(),
            geometry: Geometry::new(100.0, 100.0, 200.0, 50.0),
        }
    }
}

/// Where a new image element is placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub geometry: Geometry,
}

impl ImagePlacement {
    /// Placement for a user-uploaded image
    pub fn upload() -> Self {
        Self {
            geometry: Geometry::new(50.0, 50.0, 200.0, 200.0),
        }
    }

    /// Placement for an image picked from the design gallery
    pub fn gallery() -> Self {
        Self {
            geometry: Geometry::new(100.0, 100.0, 100.0, 100.0),
        }
    }
}

impl Default for ImagePlacement {
    fn default() -> Self {
        Self::upload()
    }
}

/// A text or image layer placed on a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignElement {
    id: ElementId,
    geometry: Geometry,
    kind: ElementKind,
}

impl DesignElement {
    /// Create a text element from the canonical defaults
    pub fn text(defaults: &TextDefaults) -> Self {
        let mut geometry = defaults.geometry;
        geometry.width = clamp_dimension(geometry.width);
        geometry.height = clamp_dimension(geometry.height);
        geometry.rotation = normalize_rotation(geometry.rotation);

        Self {
            id: ElementId::new(),
            geometry,
            kind: ElementKind::Text(TextStyle {
                content: defaults.content.clone(),
                font_family: defaults.font_family.clone(),
                font_size: defaults.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
                color: defaults.color.clone(),
                bold: false,
                italic: false,
                underline: false,
                strikethrough: false,
                shadow: false,
                extruded: false,
                arc: 0.0,
            }),
        }
    }

    /// Create an unmasked image element
    pub fn image(content_ref: impl Into<String>, placement: &ImagePlacement) -> Self {
        let mut geometry = placement.geometry;
        geometry.width = clamp_dimension(geometry.width);
        geometry.height = clamp_dimension(geometry.height);
        geometry.rotation = normalize_rotation(geometry.rotation);

        Self {
            id: ElementId::new(),
            geometry,
            kind: ElementKind::Image(ImageContent {
                content_ref: content_ref.into(),
                clip_shape: ClipShape::None,
            }),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextStyle> {
        match &self.kind {
            ElementKind::Text(style) => Some(style),
            ElementKind::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageContent> {
        match &self.kind {
            ElementKind::Image(image) => Some(image),
            ElementKind::Text(_) => None,
        }
    }

    /// Merge a partial update into this element.
    ///
    /// Returns true if any field actually changed.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        let before = self.clone();

        let geometry = &mut self.geometry;
        if let Some(x) = finite(patch.x) {
            geometry.x = x;
        }
        if let Some(y) = finite(patch.y) {
            geometry.y = y;
        }
        if let Some(width) = finite(patch.width) {
            geometry.width = clamp_dimension(width);
        }
        if let Some(height) = finite(patch.height) {
            geometry.height = clamp_dimension(height);
        }
        if let Some(rotation) = finite(patch.rotation) {
            geometry.rotation = normalize_rotation(rotation);
        }

        match &mut self.kind {
            ElementKind::Text(style) => {
                if let Some(content) = &patch.content {
                    style.content = content.clone();
                }
                if let Some(font_family) = &patch.font_family {
                    style.font_family = font_family.clone();
                }
                if let Some(font_size) = finite(patch.font_size) {
                    style.font_size = font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                }
                if let Some(color) = patch.color.as_deref().filter(|c| is_hex_color(c)) {
                    style.color = color.to_string();
                }
                if let Some(arc) = finite(patch.arc) {
                    style.arc = arc.clamp(MIN_ARC, MAX_ARC);
                }
                set_flag(&mut style.bold, patch.bold);
                set_flag(&mut style.italic, patch.italic);
                set_flag(&mut style.underline, patch.underline);
                set_flag(&mut style.strikethrough, patch.strikethrough);
                set_flag(&mut style.shadow, patch.shadow);
                set_flag(&mut style.extruded, patch.extruded);
            }
            ElementKind::Image(image) => {
                if let Some(shape) = patch.clip_shape {
                    image.clip_shape = shape;
                }
            }
        }

        *self != before
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn set_flag(flag: &mut bool, value: Option<bool>) {
    if let Some(value) = value {
        *flag = value;
    }
}

/// Partial update for a design element.
///
/// Unset fields are left alone. Text-only fields are ignored on images and
/// the clip shape is ignored on text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub content: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub shadow: Option<bool>,
    pub extruded: Option<bool>,
    pub arc: Option<f64>,
    pub clip_shape: Option<ClipShape>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn arc(mut self, arc: f64) -> Self {
        self.arc = Some(arc);
        self
    }

    pub fn clip_shape(mut self, shape: ClipShape) -> Self {
        self.clip_shape = Some(shape);
        self
    }

    /// True if the patch sets no field at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let element = DesignElement::text(&TextDefaults::default());
        let style = element.as_text().unwrap();

        assert_eq!(style.content, "YOUR TEXT HERE");
        assert_eq!(style.font_family, "Inter");
        assert_eq!(style.font_size, 32.0);
        assert_eq!(style.arc, 0.0);
        assert_eq!(element.geometry().rotation, 0.0);
        assert_eq!(element.geometry().width, 200.0);
        assert_eq!(element.geometry().height, 50.0);
    }

    #[test]
    fn test_image_starts_unmasked() {
        let element = DesignElement::image("data:image/png;base64,AAAA", &ImagePlacement::gallery());
        let image = element.as_image().unwrap();

        assert_eq!(image.clip_shape, ClipShape::None);
        assert_eq!(image.content_ref, "data:image/png;base64,AAAA");
        assert_eq!(element.geometry().x, 100.0);
        assert!(!element.is_text());
    }

    #[test]
    fn test_patch_clamps_size_and_arc() {
        let mut element = DesignElement::text(&TextDefaults::default());
        let changed = element.apply_patch(&ElementPatch::new().size(5.0, 900.0).arc(-500.0));

        assert!(changed);
        assert_eq!(element.geometry().width, MIN_ELEMENT_SIZE);
        assert_eq!(element.geometry().height, MAX_ELEMENT_SIZE);
        assert_eq!(element.as_text().unwrap().arc, MIN_ARC);
    }

    #[test]
    fn test_patch_wraps_rotation() {
        let mut element = DesignElement::image("ref", &ImagePlacement::upload());

        element.apply_patch(&ElementPatch::new().rotation(370.0));
        assert_eq!(element.geometry().rotation, 10.0);

        element.apply_patch(&ElementPatch::new().rotation(-90.0));
        assert_eq!(element.geometry().rotation, 270.0);

        element.apply_patch(&ElementPatch::new().rotation(360.0));
        assert_eq!(element.geometry().rotation, 0.0);
    }

    #[test]
    fn test_patch_ignores_fields_of_other_kind() {
        let mut image = DesignElement::image("ref", &ImagePlacement::upload());
        assert!(!image.apply_patch(&ElementPatch::new().content("HELLO").arc(40.0)));

        let mut text = DesignElement::text(&TextDefaults::default());
        assert!(!text.apply_patch(&ElementPatch::new().clip_shape(ClipShape::Star)));
    }

    #[test]
    fn test_patch_rejects_bad_color_and_nan() {
        let mut element = DesignElement::text(&TextDefaults::default());
        let changed = element.apply_patch(&ElementPatch {
            color: Some("red".to_string()),
            x: Some(f64::NAN),
            ..ElementPatch::default()
        });

        assert!(!changed);
        assert_eq!(element.as_text().unwrap().color, "#FFFFFF");
        assert_eq!(element.geometry().x, 100.0);
    }

    #[test]
    fn test_patch_same_value_reports_unchanged() {
        let mut element = DesignElement::text(&TextDefaults::default());
        assert!(!element.apply_patch(&ElementPatch::new().content("YOUR TEXT HERE")));
        assert!(element.apply_patch(&ElementPatch::new().content("HELLO").bold(true)));
        assert!(element.as_text().unwrap().bold);
    }

    #[test]
    fn test_element_kind_serialization_is_tagged() {
        let element = DesignElement::image("ref", &ImagePlacement::upload());
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["kind"]["type"], "image");
        assert_eq!(json["kind"]["clip_shape"], "none");
    }
}
