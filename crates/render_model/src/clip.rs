//! Image mask shapes

use crate::{ClipPath, Point};
use design_model::ClipShape;

const STAR: [(f64, f64); 10] = [
    (50.0, 0.0),
    (61.0, 35.0),
    (98.0, 35.0),
    (68.0, 57.0),
    (79.0, 91.0),
    (50.0, 70.0),
    (21.0, 91.0),
    (32.0, 57.0),
    (2.0, 35.0),
    (39.0, 35.0),
];

const DIAMOND: [(f64, f64); 4] = [(50.0, 0.0), (100.0, 50.0), (50.0, 100.0), (0.0, 50.0)];

const TREE: [(f64, f64); 7] = [
    (50.0, 0.0),
    (90.0, 70.0),
    (60.0, 70.0),
    (60.0, 100.0),
    (40.0, 100.0),
    (40.0, 70.0),
    (10.0, 70.0),
];

fn polygon(points: &[(f64, f64)]) -> ClipPath {
    ClipPath::Polygon {
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
    }
}

/// Clip path for an image mask, or `None` for an unmasked image
pub fn clip_path_for(shape: ClipShape) -> Option<ClipPath> {
    match shape {
        ClipShape::None => None,
        ClipShape::Round => Some(ClipPath::Circle { radius: 50.0 }),
        ClipShape::Oval => Some(ClipPath::Ellipse { rx: 50.0, ry: 30.0 }),
        ClipShape::Square => Some(ClipPath::Inset { amount: 0.0 }),
        ClipShape::Star => Some(polygon(&STAR)),
        ClipShape::Diamond => Some(polygon(&DIAMOND)),
        ClipShape::Tree => Some(polygon(&TREE)),
    }
}
