//! Render item types

use crate::{RenderError, Result};
use design_model::Surface;
use serde::{Deserialize, Serialize};

/// A rectangle in frame coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Grow the rectangle by `amount` on every side
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }
}

/// A point in frame coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GOLD: Color = Color::rgb(0xD4, 0xAF, 0x37);

    /// Parse a `#RRGGBB` string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| RenderError::InvalidColor(hex.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| RenderError::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Direction an arced baseline bends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcSweep {
    /// Positive arc, the baseline bows upward
    Clockwise,
    CounterClockwise,
}

/// Text baseline geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Baseline {
    /// Centered in the element's bounds
    Straight,
    /// Circular arc from the element's origin to its right edge, text centered on it
    Arc { radius: f64, sweep: ArcSweep },
}

impl Baseline {
    /// SVG path data for the baseline, relative to the element origin
    pub fn svg_path(&self, width: f64) -> Option<String> {
        match self {
            Baseline::Straight => None,
            Baseline::Arc { radius, sweep } => {
                let flag = match sweep {
                    ArcSweep::Clockwise => 1,
                    ArcSweep::CounterClockwise => 0,
                };
                Some(format!(
                    "M 0,0 A {radius},{radius} 0 0,{flag} {width},0"
                ))
            }
        }
    }
}

/// Mask applied to an image, in percent of the image bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClipPath {
    Circle { radius: f64 },
    Ellipse { rx: f64, ry: f64 },
    Inset { amount: f64 },
    Polygon { points: Vec<Point> },
}

impl ClipPath {
    /// CSS `clip-path` value
    pub fn to_css(&self) -> String {
        match self {
            ClipPath::Circle { radius } => format!("circle({radius}%)"),
            ClipPath::Ellipse { rx, ry } => format!("ellipse({rx}% {ry}%)"),
            ClipPath::Inset { amount } => format!("inset({amount}%)"),
            ClipPath::Polygon { points } => {
                let points: Vec<String> = points
                    .iter()
                    .map(|p| format!("{}% {}%", p.x, p.y))
                    .collect();
                format!("polygon({})", points.join(", "))
            }
        }
    }
}

/// Product photo drawn behind the design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockupRenderInfo {
    pub image_url: String,
    /// Garment or vessel color the photo is multiplied onto
    pub tint: Color,
    pub bounds: Rect,
    pub corner_radius: f64,
    pub opacity: f64,
}

/// Text element render information
///
/// Rotation is in degrees clockwise about the top-left of `bounds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRenderInfo {
    pub element_id: String,
    pub bounds: Rect,
    pub rotation: f64,
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub shadow: bool,
    pub extruded: bool,
    pub baseline: Baseline,
}

/// Image element render information
///
/// Rotation is in degrees clockwise about the top-left of `bounds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRenderInfo {
    pub element_id: String,
    /// Opaque image reference (URL or data URI)
    pub content_ref: String,
    pub bounds: Rect,
    pub rotation: f64,
    pub clip: Option<ClipPath>,
}

/// Dashed outline around the selected element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutlineInfo {
    pub element_id: String,
    pub bounds: Rect,
    /// Point the outline rotates about (the element origin)
    pub pivot: Point,
    pub rotation: f64,
    pub color: Color,
    pub stroke_width: f64,
    pub dash_length: f64,
}

/// Render item types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderItem {
    Mockup(MockupRenderInfo),
    Text(TextRenderInfo),
    Image(ImageRenderInfo),
    SelectionOutline(SelectionOutlineInfo),
}

/// A rendered surface, items ordered bottom-to-top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub surface: Surface,
    /// Display scale the frame is shown at
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
    pub items: Vec<RenderItem>,
}

impl RenderFrame {
    /// Number of design element items, excluding mockup and outline
    pub fn element_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, RenderItem::Text(_) | RenderItem::Image(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#D4AF37").unwrap(), Color::GOLD);
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::GOLD.to_hex(), "#D4AF37");
    }

    #[test]
    fn test_color_from_hex_rejects_malformed() {
        for bad in ["FFFFFF", "#FFF", "#GGGGGG", "#FFFFFFF", ""] {
            assert!(Color::from_hex(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::new(100.0, 100.0, 200.0, 50.0).inflate(5.0);
        assert_eq!(rect, Rect::new(95.0, 95.0, 210.0, 60.0));
    }

    #[test]
    fn test_arc_svg_path() {
        let up = Baseline::Arc {
            radius: 100.0,
            sweep: ArcSweep::Clockwise,
        };
        assert_eq!(up.svg_path(200.0).unwrap(), "M 0,0 A 100,100 0 0,1 200,0");

        let down = Baseline::Arc {
            radius: 100.0,
            sweep: ArcSweep::CounterClockwise,
        };
        assert_eq!(down.svg_path(150.0).unwrap(), "M 0,0 A 100,100 0 0,0 150,0");
        assert!(Baseline::Straight.svg_path(150.0).is_none());
    }

    #[test]
    fn test_clip_path_css() {
        assert_eq!(ClipPath::Circle { radius: 50.0 }.to_css(), "circle(50%)");
        assert_eq!(
            ClipPath::Ellipse { rx: 50.0, ry: 30.0 }.to_css(),
            "ellipse(50% 30%)"
        );
        let diamond = ClipPath::Polygon {
            points: vec![
                Point::new(50.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
                Point::new(0.0, 50.0),
            ],
        };
        assert_eq!(diamond.to_css(), "polygon(50% 0%, 100% 50%, 50% 100%, 0% 50%)");
    }

    #[test]
    fn test_items_serialize_with_type_tag() {
        let item = RenderItem::Image(ImageRenderInfo {
            element_id: "e1".to_string(),
            content_ref: "ref".to_string(),
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            rotation: 0.0,
            clip: Some(ClipPath::Inset { amount: 0.0 }),
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Image");
        assert_eq!(json["clip"]["kind"], "Inset");
    }
}
