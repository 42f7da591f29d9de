//! Tool selection and the drawing gesture state machine.

use crate::shapes::{Circle, Color, Eraser, Freehand, Line, Rectangle, Shape, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The fixed color palette offered for new strokes.
pub const COLOR_PALETTE: [Color; 5] = [
    Color::rgb(0x1e, 0x29, 0x3b), // slate
    Color::rgb(0xdc, 0x26, 0x26), // red
    Color::rgb(0x16, 0xa3, 0x4a), // green
    Color::rgb(0x25, 0x63, 0xeb), // blue
    Color::rgb(0x93, 0x33, 0xea), // purple
];

/// Allowed stroke width range for new shapes.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
pub const MAX_STROKE_WIDTH: f64 = 10.0;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Freehand,
    Line,
    Rectangle,
    Circle,
    Eraser,
}

impl ToolKind {
    /// Discrete shapes snap both their anchor and terminal to the grid;
    /// freehand and eraser strokes keep every raw sample.
    pub fn snaps_to_grid(self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle)
    }

    /// Path tools accumulate every move sample and paint incrementally.
    pub fn is_path_tool(self) -> bool {
        matches!(self, ToolKind::Freehand | ToolKind::Eraser)
    }
}

/// State of a drawing gesture.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture is active.
    Drawing {
        /// First point of the gesture (pointer down).
        anchor: Point,
        /// Most recent point of the gesture.
        current: Point,
        /// Every sample so far, for path tools.
        points: Vec<Point>,
    },
}

/// Manages the current tool, its style, and the active gesture.
///
/// Points handed to `begin`/`update`/`end` are expected in canvas space,
/// already snapped where the tool requires it (see [`crate::input`]).
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Style applied to new shapes at creation time.
    pub current_style: ShapeStyle,
    state: GestureState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool. Resets any in-progress gesture.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = GestureState::Idle;
    }

    /// Set the stroke color for new shapes.
    pub fn set_color(&mut self, color: Color) {
        self.current_style.stroke_color = color;
    }

    /// Set the stroke width for new shapes, clamped to the allowed range.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.current_style.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    /// Check if a gesture is active.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    /// Begin a gesture at the given point. Ignored while a gesture is
    /// already active (at most one in-progress shape at a time).
    ///
    /// Returns whether a gesture was started.
    pub fn begin(&mut self, point: Point) -> bool {
        if self.is_drawing() {
            return false;
        }
        self.state = GestureState::Drawing {
            anchor: point,
            current: point,
            points: vec![point],
        };
        true
    }

    /// Feed a move sample into the active gesture. Ignored while idle.
    ///
    /// For path tools, returns the newly added segment (previous sample to
    /// this one) so the caller can paint it incrementally.
    pub fn update(&mut self, point: Point) -> Option<(Point, Point)> {
        let is_path = self.current_tool.is_path_tool();
        let GestureState::Drawing {
            current, points, ..
        } = &mut self.state
        else {
            return None;
        };
        let previous = *current;
        *current = point;
        if is_path {
            points.push(point);
            Some((previous, point))
        } else {
            None
        }
    }

    /// End the active gesture at the given point and return the finished
    /// shape. Ignored (returns `None`) while idle.
    ///
    /// For discrete tools the shape is anchor plus this terminal point; for
    /// path tools it is the accumulated samples (the release position is
    /// not appended, matching the move-sample contract).
    pub fn end(&mut self, point: Point) -> Option<Shape> {
        let GestureState::Drawing { anchor, points, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        log::debug!(
            "finished {:?} gesture with {} sample(s)",
            self.current_tool,
            points.len()
        );
        Some(self.build_shape(anchor, point, points))
    }

    /// Cancel the active gesture without producing a shape.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    /// The in-progress shape as it would render right now: accumulated
    /// samples for path tools, anchor to current position for discrete
    /// tools.
    pub fn preview_shape(&self) -> Option<Shape> {
        let GestureState::Drawing {
            anchor,
            current,
            points,
        } = &self.state
        else {
            return None;
        };
        Some(self.build_shape(*anchor, *current, points.clone()))
    }

    fn build_shape(&self, anchor: Point, terminal: Point, points: Vec<Point>) -> Shape {
        let mut shape = match self.current_tool {
            ToolKind::Freehand => Shape::Freehand(Freehand::from_points(points)),
            ToolKind::Eraser => Shape::Eraser(Eraser::from_points(points)),
            ToolKind::Line => Shape::Line(Line::new(anchor, terminal)),
            ToolKind::Rectangle => Shape::Rectangle(Rectangle::from_corners(anchor, terminal)),
            ToolKind::Circle => Shape::Circle(Circle::new(anchor, terminal)),
        };
        *shape.style_mut() = self.current_style;
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Freehand);

        tm.set_tool(ToolKind::Rectangle);
        assert_eq!(tm.current_tool, ToolKind::Rectangle);
    }

    #[test]
    fn test_gesture_lifecycle() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        assert!(!tm.is_drawing());
        assert!(tm.begin(Point::new(0.0, 0.0)));
        assert!(tm.is_drawing());

        tm.update(Point::new(50.0, 50.0));
        assert!(tm.preview_shape().is_some());

        let shape = tm.end(Point::new(100.0, 100.0));
        assert!(matches!(shape, Some(Shape::Rectangle(_))));
        assert!(!tm.is_drawing());
    }

    #[test]
    fn test_second_down_ignored() {
        let mut tm = ToolManager::new();
        assert!(tm.begin(Point::new(0.0, 0.0)));
        assert!(!tm.begin(Point::new(99.0, 99.0)));

        // The active gesture is unchanged.
        let GestureState::Drawing { anchor, .. } = tm.state else {
            panic!("gesture should still be active");
        };
        assert_eq!(anchor, Point::ZERO);
    }

    #[test]
    fn test_events_while_idle_ignored() {
        let mut tm = ToolManager::new();
        assert!(tm.update(Point::new(5.0, 5.0)).is_none());
        assert!(tm.end(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_freehand_keeps_every_sample() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Freehand);

        tm.begin(Point::new(1.0, 1.0));
        tm.update(Point::new(2.0, 2.0));
        tm.update(Point::new(3.0, 3.0));

        let Some(Shape::Freehand(stroke)) = tm.end(Point::new(9.0, 9.0)) else {
            panic!("expected a freehand stroke");
        };
        // Down point plus move samples; the release position is not added.
        assert_eq!(
            stroke.points,
            vec![
                Point::new(1.0, 1.0),
                Point::new(2.0, 2.0),
                Point::new(3.0, 3.0)
            ]
        );
    }

    #[test]
    fn test_update_returns_incremental_segment() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Eraser);

        tm.begin(Point::new(0.0, 0.0));
        let segment = tm.update(Point::new(4.0, 0.0));
        assert_eq!(segment, Some((Point::new(0.0, 0.0), Point::new(4.0, 0.0))));
        let segment = tm.update(Point::new(8.0, 0.0));
        assert_eq!(segment, Some((Point::new(4.0, 0.0), Point::new(8.0, 0.0))));
    }

    #[test]
    fn test_discrete_tool_uses_final_point() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);

        tm.begin(Point::new(0.0, 0.0));
        tm.update(Point::new(33.0, 33.0));
        tm.update(Point::new(77.0, 12.0));

        let Some(Shape::Line(line)) = tm.end(Point::new(100.0, 40.0)) else {
            panic!("expected a line");
        };
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(100.0, 40.0));
    }

    #[test]
    fn test_style_applied_at_creation() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        tm.set_color(COLOR_PALETTE[1]);
        tm.set_stroke_width(7.0);

        tm.begin(Point::ZERO);
        let shape = tm.end(Point::new(20.0, 0.0)).unwrap();
        assert_eq!(shape.style().stroke_color, COLOR_PALETTE[1]);
        assert!((shape.style().stroke_width - 7.0).abs() < f64::EPSILON);

        // Changing the style later must not affect existing shapes.
        tm.set_stroke_width(2.0);
        assert!((shape.style().stroke_width - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stroke_width_clamped() {
        let mut tm = ToolManager::new();
        tm.set_stroke_width(25.0);
        assert!((tm.current_style.stroke_width - MAX_STROKE_WIDTH).abs() < f64::EPSILON);
        tm.set_stroke_width(0.0);
        assert!((tm.current_style.stroke_width - MIN_STROKE_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_freehand_single_point() {
        let mut tm = ToolManager::new();
        tm.begin(Point::new(5.0, 5.0));
        let Some(Shape::Freehand(stroke)) = tm.end(Point::new(5.0, 5.0)) else {
            panic!("expected a freehand stroke");
        };
        assert_eq!(stroke.points, vec![Point::new(5.0, 5.0)]);
    }
}
