//! Convert a surface's elements to a render frame

use crate::{
    clip_path_for, ArcSweep, Baseline, Color, ImageRenderInfo, MockupRenderInfo, Point, Rect,
    RenderFrame, RenderItem, SelectionOutlineInfo, TextRenderInfo,
};
use design_model::{
    Catalog, DesignElement, ElementId, ElementKind, ImageContent, ProductConfiguration,
    ProductType, Surface, TextStyle,
};

/// Configuration for render conversion
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width in design units
    pub frame_width: f64,
    /// Canvas height in design units
    pub frame_height: f64,
    /// Opacity of the mockup photo over the product color
    pub mockup_opacity: f64,
    /// Radius of the circle an arced baseline follows
    pub arc_radius: f64,
    /// Gap between an element and its selection outline
    pub selection_padding: f64,
    pub selection_color: Color,
    pub selection_stroke_width: f64,
    pub selection_dash: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_width: 500.0,
            frame_height: 600.0,
            mockup_opacity: 0.5,
            arc_radius: 100.0,
            selection_padding: 5.0,
            selection_color: Color::GOLD,
            selection_stroke_width: 2.0,
            selection_dash: 4.0,
        }
    }
}

/// Builds declarative draw lists for one surface at a time
pub struct SurfaceRenderer {
    config: RenderConfig,
}

impl SurfaceRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a surface: the mockup, every element in z-order, then the
    /// outline of the selected element if it is on this surface
    pub fn render(
        &self,
        product: &ProductConfiguration,
        catalog: &Catalog,
        surface: Surface,
        elements: &[DesignElement],
        selection: Option<ElementId>,
        zoom: f64,
    ) -> RenderFrame {
        let mut items = Vec::with_capacity(elements.len() + 2);
        items.push(RenderItem::Mockup(self.mockup(product, catalog)));

        for element in elements {
            let item = match element.kind() {
                ElementKind::Text(style) => RenderItem::Text(self.text(element, style)),
                ElementKind::Image(image) => RenderItem::Image(Self::image(element, image)),
            };
            items.push(item);
        }

        if let Some(selected) = selection.and_then(|id| elements.iter().find(|e| e.id() == id)) {
            items.push(RenderItem::SelectionOutline(self.outline(selected)));
        }

        tracing::trace!("Rendered {} with {} items", surface, items.len());

        RenderFrame {
            surface,
            zoom,
            width: self.config.frame_width,
            height: self.config.frame_height,
            items,
        }
    }

    fn mockup(&self, product: &ProductConfiguration, catalog: &Catalog) -> MockupRenderInfo {
        let product_type = product.product_type();
        let tint = catalog
            .swatch(product_type, product.color())
            .and_then(|swatch| Color::from_hex(&swatch.hex).ok())
            .unwrap_or(Color::WHITE);

        let corner_radius = match product_type {
            ProductType::CoffeeMug | ProductType::Tumbler => 10.0,
            ProductType::TShirt | ProductType::Hoodie | ProductType::ToteBag => 2.0,
        };

        MockupRenderInfo {
            image_url: catalog.product(product_type).mockup_url.clone(),
            tint,
            bounds: Rect::new(0.0, 0.0, self.config.frame_width, self.config.frame_height),
            corner_radius,
            opacity: self.config.mockup_opacity,
        }
    }

    fn text(&self, element: &DesignElement, style: &TextStyle) -> TextRenderInfo {
        let color = Color::from_hex(&style.color).unwrap_or_else(|e| {
            tracing::warn!("Text element {} falls back to white: {}", element.id(), e);
            Color::WHITE
        });

        let baseline = if style.arc == 0.0 {
            Baseline::Straight
        } else {
            Baseline::Arc {
                radius: self.config.arc_radius,
                sweep: if style.arc > 0.0 {
                    ArcSweep::Clockwise
                } else {
                    ArcSweep::CounterClockwise
                },
            }
        };

        TextRenderInfo {
            element_id: element.id().to_string(),
            bounds: bounds_of(element),
            rotation: element.geometry().rotation,
            content: style.content.clone(),
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            color,
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strikethrough: style.strikethrough,
            shadow: style.shadow,
            extruded: style.extruded,
            baseline,
        }
    }

    fn image(element: &DesignElement, image: &ImageContent) -> ImageRenderInfo {
        ImageRenderInfo {
            element_id: element.id().to_string(),
            content_ref: image.content_ref.clone(),
            bounds: bounds_of(element),
            rotation: element.geometry().rotation,
            clip: clip_path_for(image.clip_shape),
        }
    }

    fn outline(&self, element: &DesignElement) -> SelectionOutlineInfo {
        let geometry = element.geometry();
        SelectionOutlineInfo {
            element_id: element.id().to_string(),
            bounds: bounds_of(element).inflate(self.config.selection_padding),
            pivot: Point::new(geometry.x, geometry.y),
            rotation: geometry.rotation,
            color: self.config.selection_color,
            stroke_width: self.config.selection_stroke_width,
            dash_length: self.config.selection_dash,
        }
    }
}

impl Default for SurfaceRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn bounds_of(element: &DesignElement) -> Rect {
    let g = element.geometry();
    Rect::new(g.x, g.y, g.width, g.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClipPath;
    use design_model::{ClipShape, ElementPatch, ImagePlacement, TextDefaults};

    fn shirt() -> (Catalog, ProductConfiguration) {
        let catalog = Catalog::default();
        let config = ProductConfiguration::new(&catalog, ProductType::TShirt);
        (catalog, config)
    }

    #[test]
    fn test_empty_surface_renders_mockup_only() {
        let (catalog, config) = shirt();
        let frame = SurfaceRenderer::default().render(&config, &catalog, Surface::Front, &[], None, 1.0);

        assert_eq!(frame.width, 500.0);
        assert_eq!(frame.height, 600.0);
        assert_eq!(frame.items.len(), 1);
        let RenderItem::Mockup(mockup) = &frame.items[0] else {
            panic!("first item should be the mockup");
        };
        assert_eq!(mockup.tint, Color::BLACK);
        assert_eq!(mockup.corner_radius, 2.0);
        assert!(mockup.image_url.starts_with("https://"));
    }

    #[test]
    fn test_items_follow_z_order_and_outline_is_last() {
        let (catalog, config) = shirt();
        let text = DesignElement::text(&TextDefaults::default());
        let image = DesignElement::image("ref", &ImagePlacement::upload());
        let selected = text.id();
        let elements = vec![text, image];

        let frame = SurfaceRenderer::default().render(
            &config,
            &catalog,
            Surface::Front,
            &elements,
            Some(selected),
            1.5,
        );

        assert_eq!(frame.zoom, 1.5);
        assert_eq!(frame.element_count(), 2);
        assert!(matches!(frame.items[1], RenderItem::Text(_)));
        assert!(matches!(frame.items[2], RenderItem::Image(_)));
        let RenderItem::SelectionOutline(outline) = &frame.items[3] else {
            panic!("outline should be drawn last");
        };
        assert_eq!(outline.bounds, Rect::new(95.0, 95.0, 210.0, 60.0));
        assert_eq!(outline.pivot, Point::new(100.0, 100.0));
        assert_eq!(outline.color, Color::GOLD);
    }

    #[test]
    fn test_selection_on_other_surface_draws_no_outline() {
        let (catalog, config) = shirt();
        let elements = vec![DesignElement::text(&TextDefaults::default())];
        let elsewhere = ElementId::new();

        let frame = SurfaceRenderer::default().render(
            &config,
            &catalog,
            Surface::Back,
            &elements,
            Some(elsewhere),
            1.0,
        );
        assert!(!frame
            .items
            .iter()
            .any(|item| matches!(item, RenderItem::SelectionOutline(_))));
    }

    #[test]
    fn test_arc_sign_picks_sweep() {
        let (catalog, config) = shirt();
        let mut up = DesignElement::text(&TextDefaults::default());
        up.apply_patch(&ElementPatch::new().arc(45.0));
        let mut down = DesignElement::text(&TextDefaults::default());
        down.apply_patch(&ElementPatch::new().arc(-45.0));
        let flat = DesignElement::text(&TextDefaults::default());

        let frame = SurfaceRenderer::default().render(
            &config,
            &catalog,
            Surface::Front,
            &[up, down, flat],
            None,
            1.0,
        );
        let baselines: Vec<Baseline> = frame
            .items
            .iter()
            .filter_map(|item| match item {
                RenderItem::Text(text) => Some(text.baseline),
                _ => None,
            })
            .collect();

        assert_eq!(
            baselines,
            vec![
                Baseline::Arc {
                    radius: 100.0,
                    sweep: ArcSweep::Clockwise
                },
                Baseline::Arc {
                    radius: 100.0,
                    sweep: ArcSweep::CounterClockwise
                },
                Baseline::Straight,
            ]
        );
    }

    #[test]
    fn test_image_clip_and_mug_corners() {
        let catalog = Catalog::default();
        let config = ProductConfiguration::new(&catalog, ProductType::CoffeeMug);
        let mut image = DesignElement::image("ref", &ImagePlacement::gallery());
        image.apply_patch(&ElementPatch::new().clip_shape(ClipShape::Round));

        let frame = SurfaceRenderer::default().render(
            &config,
            &catalog,
            Surface::Left,
            &[image],
            None,
            1.0,
        );

        let RenderItem::Mockup(mockup) = &frame.items[0] else {
            panic!("first item should be the mockup");
        };
        assert_eq!(mockup.corner_radius, 10.0);
        assert_eq!(mockup.tint, Color::WHITE);

        let RenderItem::Image(info) = &frame.items[1] else {
            panic!("second item should be the image");
        };
        assert_eq!(info.clip, Some(ClipPath::Circle { radius: 50.0 }));
        assert_eq!(info.bounds, Rect::new(100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_malformed_text_color_falls_back_to_white() {
        let (catalog, config) = shirt();
        let defaults = TextDefaults {
            color: "gold".to_string(),
            ..TextDefaults::default()
        };
        let frame = SurfaceRenderer::default().render(
            &config,
            &catalog,
            Surface::Front,
            &[DesignElement::text(&defaults)],
            None,
            1.0,
        );
        let RenderItem::Text(text) = &frame.items[1] else {
            panic!("second item should be text");
        };
        assert_eq!(text.color, Color::WHITE);
    }
}
