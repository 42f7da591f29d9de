//! Eraser stroke.

use super::freehand::{polyline_bounds, polyline_path};
use super::{ShapeId, ShapeStyle, SketchShape};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stroke width every eraser stroke is painted at.
pub const ERASER_WIDTH: f64 = 20.0;

/// An eraser stroke: sampled like a freehand path, but painted in the
/// background color at [`ERASER_WIDTH`].
///
/// This is paint-over, not subtractive compositing: the stroke participates
/// in normal z-order, so shapes drawn after it show through an "erased"
/// area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eraser {
    pub(crate) id: ShapeId,
    /// Points in the stroke path.
    pub points: Vec<Point>,
    /// Recorded style; ignored when painting.
    pub style: ShapeStyle,
}

impl Eraser {
    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }
}

impl SketchShape for Eraser {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        polyline_bounds(&self.points)
    }

    fn to_path(&self) -> BezPath {
        polyline_path(&self.points)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
