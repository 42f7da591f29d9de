//! Circle.

use super::{ShapeId, ShapeStyle, SketchShape};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by its center and a point on its rim.
///
/// The radius is the Euclidean distance between the two stored points, not
/// an ellipse fitted to a bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point (pointer down).
    pub center: Point,
    /// Rim point (pointer up).
    pub rim: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a circle from its center and a rim point.
    pub fn new(center: Point, rim: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            rim,
            style: ShapeStyle::default(),
        }
    }

    /// Radius: distance from center to rim.
    pub fn radius(&self) -> f64 {
        self.center.distance(self.rim)
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius())
    }
}

impl SketchShape for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
