//! Blueprint-styled export rendering.
//!
//! The export is a stylized technical drawing, not a pixel copy of the
//! live surface: every shape is re-rendered in a single ink color over a
//! branded grid, rectangles get a translucent room fill, and a title plus
//! scale indicator are stamped on top.

use crate::error::{RenderError, RenderResult};
use crate::glyphs;
use crate::surface::{paint_grid, round_stroke, solid_paint, to_sk_color, to_sk_path};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use grundriss_core::Sketch;
use grundriss_core::shapes::{Color, ERASER_WIDTH, Shape};
use grundriss_core::snap::GRID_SIZE;
use tiny_skia::{PathBuilder, Pixmap, Transform};

/// Ink color every exported shape is drawn in.
pub const EXPORT_INK: Color = Color::rgb(0x1e, 0x40, 0xaf);
/// Blueprint grid color, lighter than the interactive grid.
pub const EXPORT_GRID: Color = Color::rgb(0xdb, 0xea, 0xfe);
/// Translucent fill suggesting enclosed rooms (rectangles only).
pub const ROOM_FILL: Color = Color::new(0xdb, 0xea, 0xfe, 77);
/// Exported strokes never go below this width.
pub const MIN_EXPORT_STROKE: f64 = 2.0;
/// Title stamped in the top-left corner.
pub const EXPORT_TITLE: &str = "GRUNDRISS-SKIZZE";
/// Annotation above the scale bar.
pub const SCALE_LABEL: &str = "≈ 5M";

/// Scale bar geometry: a 100-unit bar in the bottom-right corner.
const SCALE_BAR_LENGTH: f32 = 100.0;
const SCALE_BAR_MARGIN: f32 = 10.0;

/// Re-render the shape list in presentation style onto a fresh pixmap.
///
/// An empty shape list yields the labeled grid background; that is a valid
/// export, not an error.
pub fn render_export(sketch: &Sketch, width: u32, height: u32) -> RenderResult<Pixmap> {
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
    pixmap.fill(to_sk_color(Color::white()));
    paint_grid(&mut pixmap, GRID_SIZE, EXPORT_GRID);

    for shape in sketch.shapes() {
        paint_export_shape(&mut pixmap, shape);
    }

    draw_annotations(&mut pixmap);
    log::debug!("exported {} shape(s) at {}x{}", sketch.len(), width, height);
    Ok(pixmap)
}

/// Render the shape list and encode it as a `data:image/png;base64,`
/// data URL for hand-off to the surrounding application.
pub fn export_data_url(sketch: &Sketch, width: u32, height: u32) -> RenderResult<String> {
    let pixmap = render_export(sketch, width, height)?;
    let png = encode_png(&pixmap)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

fn paint_export_shape(pixmap: &mut Pixmap, shape: &Shape) {
    let path = shape.to_path();
    if path.elements().is_empty() {
        return;
    }
    let Some(sk_path) = to_sk_path(&path) else {
        return;
    };

    let (color, width) = if shape.is_eraser() {
        (Color::white(), ERASER_WIDTH)
    } else {
        (EXPORT_INK, shape.style().stroke_width.max(MIN_EXPORT_STROKE))
    };
    pixmap.stroke_path(
        &sk_path,
        &solid_paint(color),
        &round_stroke(width),
        Transform::identity(),
        None,
    );

    if let Shape::Rectangle(rect) = shape {
        let bounds = rect.as_rect();
        if let Some(fill) = tiny_skia::Rect::from_ltrb(
            bounds.x0 as f32,
            bounds.y0 as f32,
            bounds.x1 as f32,
            bounds.y1 as f32,
        ) {
            pixmap.fill_rect(fill, &solid_paint(ROOM_FILL), Transform::identity(), None);
        }
    }
}

fn draw_annotations(pixmap: &mut Pixmap) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    // Title, 14px tall, top-left.
    glyphs::draw_text(pixmap, 10, 6, 2, EXPORT_INK, EXPORT_TITLE);

    // Scale bar along the bottom-right edge.
    let bar_y = height - 20.0;
    let bar_right = width - SCALE_BAR_MARGIN;
    let bar_left = bar_right - SCALE_BAR_LENGTH;
    let mut pb = PathBuilder::new();
    pb.move_to(bar_left, bar_y);
    pb.line_to(bar_right, bar_y);
    if let Some(bar) = pb.finish() {
        pixmap.stroke_path(
            &bar,
            &solid_paint(EXPORT_INK),
            &round_stroke(2.0),
            Transform::identity(),
            None,
        );
    }

    // Annotation centered over the bar.
    let label_x = (bar_left + bar_right) as i32 / 2 - glyphs::text_width(SCALE_LABEL, 1) / 2;
    let label_y = bar_y as i32 - 12;
    glyphs::draw_text(pixmap, label_x, label_y, 1, EXPORT_INK, SCALE_LABEL);
}

/// Encode a pixmap as PNG bytes.
fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let mut rgba = Vec::with_capacity((pixmap.width() * pixmap.height() * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
    }
    Ok(png_data)
}
