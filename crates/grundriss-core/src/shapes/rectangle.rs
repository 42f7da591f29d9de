//! Rectangle (room outline).

use super::{ShapeId, ShapeStyle, SketchShape};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle defined by two opposite corners.
///
/// The corners are stored exactly as drawn: dragging up or left of the
/// anchor keeps a negative extent rather than swapping the corners, so the
/// renderer must accept signed widths and heights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Anchor corner (pointer down).
    pub anchor: Point,
    /// Terminal corner (pointer up).
    pub terminal: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a rectangle from two opposite corners, unnormalized.
    pub fn from_corners(anchor: Point, terminal: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            terminal,
            style: ShapeStyle::default(),
        }
    }

    /// Signed horizontal extent (negative when dragged leftwards).
    pub fn width(&self) -> f64 {
        self.terminal.x - self.anchor.x
    }

    /// Signed vertical extent (negative when dragged upwards).
    pub fn height(&self) -> f64 {
        self.terminal.y - self.anchor.y
    }

    /// Normalized rectangle covering the same screen area.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.terminal)
    }
}

impl SketchShape for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        // Built from the corner coordinates directly so signed extents need
        // no special casing.
        let mut path = BezPath::new();
        path.move_to(self.anchor);
        path.line_to(Point::new(self.terminal.x, self.anchor.y));
        path.line_to(self.terminal);
        path.line_to(Point::new(self.anchor.x, self.terminal.y));
        path.close_path();
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_extents() {
        let rect = Rectangle::from_corners(Point::new(100.0, 100.0), Point::new(40.0, 60.0));
        assert!((rect.width() + 60.0).abs() < f64::EPSILON);
        assert!((rect.height() + 40.0).abs() < f64::EPSILON);
        // Corners survive as drawn.
        assert_eq!(rect.anchor, Point::new(100.0, 100.0));
        assert_eq!(rect.terminal, Point::new(40.0, 60.0));
    }

    #[test]
    fn test_reverse_drag_same_area() {
        let forward = Rectangle::from_corners(Point::new(40.0, 60.0), Point::new(100.0, 100.0));
        let reverse = Rectangle::from_corners(Point::new(100.0, 100.0), Point::new(40.0, 60.0));
        assert_eq!(forward.as_rect(), reverse.as_rect());
        assert!(reverse.width() < 0.0 && reverse.height() < 0.0);
    }

    #[test]
    fn test_path_is_closed() {
        let rect = Rectangle::from_corners(Point::ZERO, Point::new(20.0, 20.0));
        let path = rect.to_path();
        assert_eq!(path.elements().len(), 5);
    }
}
