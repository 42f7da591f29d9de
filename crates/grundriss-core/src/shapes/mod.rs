//! Shape definitions for the sketch surface.

mod circle;
mod eraser;
mod freehand;
mod line;
mod rectangle;

pub use circle::Circle;
pub use eraser::{ERASER_WIDTH, Eraser};
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// The same color with a replaced alpha component.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Style properties applied to a shape at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: Color,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            // Default pen: dark slate, matching the first palette entry.
            stroke_color: Color::rgb(0x1e, 0x29, 0x3b),
            stroke_width: 3.0,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common accessor surface for all shapes.
pub trait SketchShape {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Get the path representation for rendering. An under-specified shape
    /// (fewer points than its tool requires) yields an empty path.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Enum wrapper for all shape types (for storage and serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Freehand(Freehand),
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Eraser(Eraser),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Freehand(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Eraser(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Eraser(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Freehand(s) => s.to_path(),
            Shape::Line(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Eraser(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Freehand(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Eraser(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Freehand(s) => s.style_mut(),
            Shape::Line(s) => s.style_mut(),
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Circle(s) => s.style_mut(),
            Shape::Eraser(s) => s.style_mut(),
        }
    }

    /// Check if this shape is an eraser stroke (painted in the background
    /// color at a fixed width, regardless of its recorded style).
    pub fn is_eraser(&self) -> bool {
        matches!(self, Shape::Eraser(_))
    }

    /// The ordered geometry points of this shape: every sample for
    /// freehand/eraser strokes, anchor and terminal for the discrete tools.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Freehand(s) => s.points.clone(),
            Shape::Line(s) => vec![s.start, s.end],
            Shape::Rectangle(s) => vec![s.anchor, s.terminal],
            Shape::Circle(s) => vec![s.center, s.rim],
            Shape::Eraser(s) => s.points.clone(),
        }
    }
}
