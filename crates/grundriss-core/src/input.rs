//! Pointer input translation from client space to canvas space.

use crate::snap::{GRID_SIZE, snap_to_grid};
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling, carrying
/// client-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Mouse button press or touch start.
    Down { x: f64, y: f64 },
    /// Pointer or touch movement.
    Move { x: f64, y: f64 },
    /// Mouse button release or touch end.
    Up { x: f64, y: f64 },
    /// Pointer left the canvas area; treated like `Up`.
    Leave { x: f64, y: f64 },
}

impl PointerEvent {
    /// Client-space position of the event.
    pub fn position(&self) -> (f64, f64) {
        match *self {
            PointerEvent::Down { x, y }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y }
            | PointerEvent::Leave { x, y } => (x, y),
        }
    }
}

/// On-screen placement of the canvas: where its display rectangle sits in
/// client space and what its internal raster resolution is. The two can
/// differ (a canvas scaled down by layout), so event coordinates are scale
/// corrected on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Client-space X of the display rectangle's left edge.
    pub left: f64,
    /// Client-space Y of the display rectangle's top edge.
    pub top: f64,
    /// On-screen width of the display rectangle.
    pub display_width: f64,
    /// On-screen height of the display rectangle.
    pub display_height: f64,
    /// Internal raster width.
    pub canvas_width: f64,
    /// Internal raster height.
    pub canvas_height: f64,
}

impl Viewport {
    /// A viewport whose display size equals its raster size (no scaling).
    pub fn identity(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: canvas_width,
            display_height: canvas_height,
            canvas_width,
            canvas_height,
        }
    }

    /// Map a client-space position into raster coordinates.
    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        if self.display_width <= 0.0 || self.display_height <= 0.0 {
            return Point::ZERO;
        }
        let scale_x = self.canvas_width / self.display_width;
        let scale_y = self.canvas_height / self.display_height;
        Point::new(
            (client_x - self.left) * scale_x,
            (client_y - self.top) * scale_y,
        )
    }
}

/// Translate a pointer event into a canvas-space point for the given tool:
/// scale corrected through the viewport, then grid-snapped for the discrete
/// tools. Freehand and eraser keep the raw sample.
///
/// A missing viewport yields the origin.
pub fn canvas_point(viewport: Option<&Viewport>, event: &PointerEvent, tool: ToolKind) -> Point {
    let Some(viewport) = viewport else {
        return Point::ZERO;
    };
    let (x, y) = event.position();
    let point = viewport.to_canvas(x, y);
    if tool.snaps_to_grid() {
        snap_to_grid(point, GRID_SIZE)
    } else {
        point
    }
}
