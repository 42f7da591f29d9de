//! The sketch document: an ordered shape list with linear undo.

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};

/// All shapes of one drawing session, in z-order (back to front).
///
/// The list is the sole source of truth for what is drawn; any raster view
/// of it is a derived, regenerable projection. It grows by one shape per
/// completed gesture, shrinks from the tail by [`Sketch::undo`], and is
/// emptied by [`Sketch::clear`]. There is no redo: history is linear and
/// one-directional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sketch {
    shapes: Vec<Shape>,
}

impl Sketch {
    /// Create a new empty sketch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished shape.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove the most recently appended shape.
    ///
    /// Returns true if a shape was removed; a no-op on an empty list.
    pub fn undo(&mut self) -> bool {
        self.shapes.pop().is_some()
    }

    /// Remove all shapes unconditionally.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Shapes in z-order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Check if the sketch is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the sketch to JSON (diagnostics; the session lifecycle
    /// never persists the shape list).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a sketch from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Freehand, Line};
    use kurbo::Point;

    fn line(x: f64) -> Shape {
        Shape::Line(Line::new(Point::new(x, 0.0), Point::new(x, 20.0)))
    }

    #[test]
    fn test_append_order() {
        let mut sketch = Sketch::new();
        sketch.add_shape(line(0.0));
        sketch.add_shape(line(20.0));
        assert_eq!(sketch.len(), 2);

        let xs: Vec<f64> = sketch
            .shapes()
            .iter()
            .map(|s| s.points()[0].x)
            .collect();
        assert_eq!(xs, vec![0.0, 20.0]);
    }

    #[test]
    fn test_undo_pops_tail() {
        let mut sketch = Sketch::new();
        sketch.add_shape(line(0.0));
        sketch.add_shape(line(20.0));

        assert!(sketch.undo());
        assert_eq!(sketch.len(), 1);
        assert!((sketch.shapes()[0].points()[0].x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_n_undos_empty_the_list() {
        let mut sketch = Sketch::new();
        for i in 0..5 {
            sketch.add_shape(line(i as f64 * 20.0));
        }
        for _ in 0..5 {
            assert!(sketch.undo());
        }
        assert!(sketch.is_empty());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut sketch = Sketch::new();
        assert!(!sketch.undo());
        assert!(sketch.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut sketch = Sketch::new();
        sketch.add_shape(line(0.0));
        sketch.add_shape(line(20.0));
        sketch.clear();
        assert!(sketch.is_empty());

        // Clearing an already-empty sketch is fine too.
        sketch.clear();
        assert!(sketch.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut sketch = Sketch::new();
        sketch.add_shape(line(40.0));
        sketch.add_shape(Shape::Freehand(Freehand::from_points(vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
        ])));

        let json = sketch.to_json().unwrap();
        let restored = Sketch::from_json(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.shapes()[1].points()[1], Point::new(3.0, 4.0));
    }
}
