//! The persistent raster surface for the interactive sketch view.

use crate::error::{RenderError, RenderResult};
use grundriss_core::Sketch;
use grundriss_core::shapes::{Color, ERASER_WIDTH, Shape, ShapeStyle};
use grundriss_core::snap::GRID_SIZE;
use kurbo::{BezPath, PathEl, Point};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Default raster resolution of a sketch surface.
pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

/// Surface background.
pub const BACKGROUND: Color = Color::white();
/// Interactive grid line color.
pub const GRID_LINE: Color = Color::rgb(0xe2, 0xe8, 0xf0);
/// Grid lines are hairlines.
pub(crate) const GRID_LINE_WIDTH: f32 = 0.5;

pub(crate) fn to_sk_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

pub(crate) fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_sk_color(color));
    paint.anti_alias = true;
    paint
}

/// Round caps and joins, matching hand-drawn stroke expectations.
pub(crate) fn round_stroke(width: f64) -> Stroke {
    Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Convert a kurbo path into a tiny-skia path. Empty paths yield `None`.
pub(crate) fn to_sk_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Paint the reference grid over the whole pixmap.
pub(crate) fn paint_grid(pixmap: &mut Pixmap, grid_size: f64, color: Color) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let step = grid_size as f32;

    let mut pb = PathBuilder::new();
    let mut x = 0.0;
    while x <= width {
        pb.move_to(x, 0.0);
        pb.line_to(x, height);
        x += step;
    }
    let mut y = 0.0;
    while y <= height {
        pb.move_to(0.0, y);
        pb.line_to(width, y);
        y += step;
    }

    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: GRID_LINE_WIDTH,
            ..Stroke::default()
        };
        pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}

/// Stroke color and width a shape is painted with in the interactive view.
/// Eraser strokes ignore their recorded style.
fn effective_stroke(shape: &Shape) -> (Color, f64) {
    if shape.is_eraser() {
        (BACKGROUND, ERASER_WIDTH)
    } else {
        let style = shape.style();
        (style.stroke_color, style.stroke_width)
    }
}

/// A raster projection of the shape list: background grid plus every shape
/// in z-order, with incremental painting for the stroke in progress.
pub struct Surface {
    pixmap: Pixmap,
    grid_size: f64,
}

impl Surface {
    /// Allocate a surface showing the empty background.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        let mut surface = Self {
            pixmap,
            grid_size: GRID_SIZE,
        };
        surface.paint_background();
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Read access to the raster, for embedders that blit it to screen.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn paint_background(&mut self) {
        self.pixmap.fill(to_sk_color(BACKGROUND));
        paint_grid(&mut self.pixmap, self.grid_size, GRID_LINE);
    }

    /// Paint one shape over the current raster content.
    pub fn paint_shape(&mut self, shape: &Shape) {
        let path = shape.to_path();
        if path.elements().is_empty() {
            // Under-specified shapes render nothing.
            return;
        }
        let Some(sk_path) = to_sk_path(&path) else {
            return;
        };
        let (color, width) = effective_stroke(shape);
        self.pixmap.stroke_path(
            &sk_path,
            &solid_paint(color),
            &round_stroke(width),
            Transform::identity(),
            None,
        );
    }

    /// Paint just the newest segment of an in-progress stroke. Avoids a
    /// full redraw on every move sample of a long freehand stroke.
    pub fn paint_segment(&mut self, from: Point, to: Point, style: &ShapeStyle, eraser: bool) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };
        let (color, width) = if eraser {
            (BACKGROUND, ERASER_WIDTH)
        } else {
            (style.stroke_color, style.stroke_width)
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &round_stroke(width),
            Transform::identity(),
            None,
        );
    }

    /// Repaint the whole surface from the shape list.
    pub fn redraw(&mut self, sketch: &Sketch) {
        log::trace!("full redraw of {} shape(s)", sketch.len());
        self.paint_background();
        for shape in sketch.shapes() {
            self.paint_shape(shape);
        }
    }

    /// Repaint the whole surface, then overlay an in-progress shape
    /// preview. Used while dragging out a discrete shape, whose extent
    /// changes with every sample.
    pub fn redraw_with_preview(&mut self, sketch: &Sketch, preview: Option<&Shape>) {
        self.redraw(sketch);
        if let Some(shape) = preview {
            self.paint_shape(shape);
        }
    }
}
