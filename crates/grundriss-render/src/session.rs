//! Interactive drawing session: event wiring and lifecycle.
//!
//! A session owns the shape list, the tool state and the raster surface,
//! and drives them from pointer events. All work happens synchronously in
//! the event handlers; the session ignores events that do not match its
//! current state, so at most one shape is ever in progress.

use crate::error::RenderResult;
use crate::export;
use crate::surface::{CANVAS_HEIGHT, CANVAS_WIDTH, Surface};
use grundriss_core::shapes::Color;
use grundriss_core::{PointerEvent, Sketch, ToolKind, ToolManager, Viewport, canvas_point};

/// One sketch-drawing session, from open to save or cancel.
pub struct SketchSession {
    sketch: Sketch,
    tools: ToolManager,
    surface: Surface,
    viewport: Option<Viewport>,
}

impl SketchSession {
    /// Open a session at the default raster size.
    pub fn new() -> RenderResult<Self> {
        Self::with_size(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Open a session with a custom raster size. The viewport starts as an
    /// identity mapping (display size == raster size).
    pub fn with_size(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            sketch: Sketch::new(),
            tools: ToolManager::new(),
            surface: Surface::new(width, height)?,
            viewport: Some(Viewport::identity(width as f64, height as f64)),
        })
    }

    /// Update the on-screen placement of the canvas. `None` means the
    /// canvas is not laid out; events then map to the origin.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    /// Select the drawing tool. Resets any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    /// Set the stroke color for new shapes.
    pub fn set_color(&mut self, color: Color) {
        self.tools.set_color(color);
    }

    /// Set the stroke width for new shapes.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.tools.set_stroke_width(width);
    }

    /// Feed one pointer event through the drawing state machine.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { .. } => self.pointer_down(&event),
            PointerEvent::Move { .. } => self.pointer_move(&event),
            // Leaving the canvas finalizes the gesture exactly like a
            // release; there is no abort-without-commit path.
            PointerEvent::Up { .. } | PointerEvent::Leave { .. } => self.pointer_up(&event),
        }
    }

    fn map(&self, event: &PointerEvent) -> kurbo::Point {
        canvas_point(self.viewport.as_ref(), event, self.tools.current_tool)
    }

    fn pointer_down(&mut self, event: &PointerEvent) {
        let point = self.map(event);
        if !self.tools.begin(point) {
            log::debug!("ignoring pointer down during an active gesture");
        }
    }

    fn pointer_move(&mut self, event: &PointerEvent) {
        if !self.tools.is_drawing() {
            return;
        }
        let point = self.map(event);
        if self.tools.current_tool.is_path_tool() {
            // Paint only the newest segment; long strokes stay cheap.
            if let Some((from, to)) = self.tools.update(point) {
                let style = self.tools.current_style;
                let eraser = self.tools.current_tool == ToolKind::Eraser;
                self.surface.paint_segment(from, to, &style, eraser);
            }
        } else {
            // Shape previews are not incremental: the extent changes with
            // every sample, so repaint the persisted shapes underneath.
            self.tools.update(point);
            let preview = self.tools.preview_shape();
            self.surface.redraw_with_preview(&self.sketch, preview.as_ref());
        }
    }

    fn pointer_up(&mut self, event: &PointerEvent) {
        if !self.tools.is_drawing() {
            return;
        }
        let point = self.map(event);
        if let Some(shape) = self.tools.end(point) {
            log::debug!("committing shape {}", shape.id());
            self.sketch.add_shape(shape);
            self.surface.redraw(&self.sketch);
        }
    }

    /// Remove the most recent shape and repaint. No-op on an empty sketch.
    pub fn undo(&mut self) -> bool {
        if self.sketch.undo() {
            self.surface.redraw(&self.sketch);
            true
        } else {
            false
        }
    }

    /// Remove all shapes and repaint (grid only).
    pub fn clear(&mut self) {
        self.sketch.clear();
        self.surface.redraw(&self.sketch);
    }

    /// Repaint everything, including the in-progress preview if any. For
    /// embedders whose display invalidates outside the event flow.
    pub fn refresh(&mut self) {
        let preview = self.tools.preview_shape();
        self.surface.redraw_with_preview(&self.sketch, preview.as_ref());
    }

    /// Produce the blueprint export as a base64 PNG data URL. The caller
    /// drops the session afterwards; the shape list is never persisted.
    pub fn save(&self) -> RenderResult<String> {
        export::export_data_url(&self.sketch, self.surface.width(), self.surface.height())
    }

    /// Discard the session without producing output.
    pub fn cancel(self) {}

    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn is_drawing(&self) -> bool {
        self.tools.is_drawing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grundriss_core::shapes::Shape;
    use kurbo::Point;

    fn drag(session: &mut SketchSession, from: (f64, f64), via: &[(f64, f64)], to: (f64, f64)) {
        session.handle_pointer_event(PointerEvent::Down {
            x: from.0,
            y: from.1,
        });
        for &(x, y) in via {
            session.handle_pointer_event(PointerEvent::Move { x, y });
        }
        session.handle_pointer_event(PointerEvent::Up { x: to.0, y: to.1 });
    }

    #[test]
    fn test_gesture_appends_one_shape() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Line);
        drag(&mut session, (0.0, 0.0), &[(30.0, 30.0)], (100.0, 100.0));
        assert_eq!(session.sketch().len(), 1);
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_snapping_ignores_intermediate_moves() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Rectangle);
        // Down at (33, 47) and up at (111, 152), wandering in between.
        drag(
            &mut session,
            (33.0, 47.0),
            &[(1.0, 1.0), (333.0, 555.0), (70.0, 70.0)],
            (111.0, 152.0),
        );

        let points = session.sketch().shapes()[0].points();
        assert_eq!(points[0], Point::new(40.0, 40.0));
        assert_eq!(points[1], Point::new(120.0, 160.0));
    }

    #[test]
    fn test_freehand_persists_every_sample() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Freehand);
        drag(
            &mut session,
            (10.5, 10.5),
            &[(11.0, 12.0), (13.0, 14.5), (17.0, 18.0)],
            (17.0, 18.0),
        );

        let points = session.sketch().shapes()[0].points();
        assert_eq!(
            points,
            vec![
                Point::new(10.5, 10.5),
                Point::new(11.0, 12.0),
                Point::new(13.0, 14.5),
                Point::new(17.0, 18.0),
            ]
        );
    }

    #[test]
    fn test_leave_finalizes_like_up() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Line);
        session.handle_pointer_event(PointerEvent::Down { x: 0.0, y: 0.0 });
        session.handle_pointer_event(PointerEvent::Move { x: 50.0, y: 50.0 });
        session.handle_pointer_event(PointerEvent::Leave { x: 80.0, y: 80.0 });

        assert_eq!(session.sketch().len(), 1);
        assert!(!session.is_drawing());
        let points = session.sketch().shapes()[0].points();
        assert_eq!(points[1], Point::new(80.0, 80.0));
    }

    #[test]
    fn test_events_outside_active_state_ignored() {
        let mut session = SketchSession::new().unwrap();
        // Move and up while idle do nothing.
        session.handle_pointer_event(PointerEvent::Move { x: 10.0, y: 10.0 });
        session.handle_pointer_event(PointerEvent::Up { x: 10.0, y: 10.0 });
        assert!(session.sketch().is_empty());

        // A second down during a gesture does not restart it.
        session.set_tool(ToolKind::Line);
        session.handle_pointer_event(PointerEvent::Down { x: 0.0, y: 0.0 });
        session.handle_pointer_event(PointerEvent::Down { x: 200.0, y: 200.0 });
        session.handle_pointer_event(PointerEvent::Up { x: 100.0, y: 100.0 });

        let points = session.sketch().shapes()[0].points();
        assert_eq!(points[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_n_undos_restore_initial_raster() {
        let mut session = SketchSession::new().unwrap();
        let initial = session.surface().pixmap().data().to_vec();

        session.set_tool(ToolKind::Rectangle);
        drag(&mut session, (40.0, 40.0), &[], (160.0, 120.0));
        session.set_tool(ToolKind::Freehand);
        drag(&mut session, (300.0, 300.0), &[(310.0, 320.0)], (310.0, 320.0));
        session.set_tool(ToolKind::Circle);
        drag(&mut session, (400.0, 400.0), &[], (480.0, 400.0));
        assert_eq!(session.sketch().len(), 3);
        assert_ne!(session.surface().pixmap().data(), initial.as_slice());

        for _ in 0..3 {
            assert!(session.undo());
        }
        assert!(session.sketch().is_empty());
        assert_eq!(session.surface().pixmap().data(), initial.as_slice());

        // Undo on the empty list is a no-op, not an underflow.
        assert!(!session.undo());
    }

    #[test]
    fn test_clear_restores_grid_only() {
        let mut session = SketchSession::new().unwrap();
        let initial = session.surface().pixmap().data().to_vec();

        session.set_tool(ToolKind::Freehand);
        drag(&mut session, (100.0, 100.0), &[(150.0, 150.0)], (150.0, 150.0));
        session.clear();

        assert!(session.sketch().is_empty());
        assert_eq!(session.surface().pixmap().data(), initial.as_slice());
    }

    #[test]
    fn test_viewport_scale_correction() {
        let mut session = SketchSession::new().unwrap();
        // Canvas shown at half size: client coords double on the way in.
        session.set_viewport(Some(Viewport {
            left: 0.0,
            top: 0.0,
            display_width: 400.0,
            display_height: 300.0,
            canvas_width: 800.0,
            canvas_height: 600.0,
        }));
        session.set_tool(ToolKind::Freehand);
        drag(&mut session, (50.0, 50.0), &[], (50.0, 50.0));

        let points = session.sketch().shapes()[0].points();
        assert_eq!(points[0], Point::new(100.0, 100.0));
    }

    #[test]
    fn test_missing_viewport_maps_to_origin() {
        let mut session = SketchSession::new().unwrap();
        session.set_viewport(None);
        session.set_tool(ToolKind::Freehand);
        drag(&mut session, (50.0, 50.0), &[], (50.0, 50.0));

        let points = session.sketch().shapes()[0].points();
        assert_eq!(points[0], Point::ZERO);
    }

    #[test]
    fn test_save_produces_data_url() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Rectangle);
        drag(&mut session, (0.0, 0.0), &[], (100.0, 100.0));

        let url = session.save().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_incremental_freehand_paints_during_gesture() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Freehand);
        session.set_stroke_width(6.0);
        session.handle_pointer_event(PointerEvent::Down { x: 100.0, y: 100.0 });
        session.handle_pointer_event(PointerEvent::Move { x: 160.0, y: 100.0 });

        // The stroke is visible before the gesture completes.
        let px = session
            .surface()
            .pixmap()
            .pixel(130, 100)
            .unwrap()
            .demultiply();
        assert!(px.red() < 255);

        session.handle_pointer_event(PointerEvent::Up { x: 160.0, y: 100.0 });
        assert_eq!(session.sketch().len(), 1);
    }

    #[test]
    fn test_refresh_repaints_current_state() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Line);
        drag(&mut session, (0.0, 0.0), &[], (100.0, 100.0));

        let before = session.surface().pixmap().data().to_vec();
        session.refresh();
        assert_eq!(session.surface().pixmap().data(), before.as_slice());
    }

    #[test]
    fn test_preview_does_not_commit() {
        let mut session = SketchSession::new().unwrap();
        session.set_tool(ToolKind::Circle);
        session.handle_pointer_event(PointerEvent::Down { x: 200.0, y: 200.0 });
        session.handle_pointer_event(PointerEvent::Move { x: 300.0, y: 200.0 });

        // Preview painted, but nothing persisted yet.
        assert!(session.is_drawing());
        assert!(session.sketch().is_empty());

        session.handle_pointer_event(PointerEvent::Up { x: 300.0, y: 200.0 });
        assert_eq!(session.sketch().len(), 1);
        assert!(matches!(session.sketch().shapes()[0], Shape::Circle(_)));
    }
}
