//! Replays a scripted drawing session and writes the blueprint export.
//!
//! Run with `cargo run --example floorplan`; produces `floorplan.png` in
//! the working directory.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use grundriss_core::{COLOR_PALETTE, PointerEvent, ToolKind};
use grundriss_render::SketchSession;

fn drag(session: &mut SketchSession, from: (f64, f64), to: (f64, f64)) {
    session.handle_pointer_event(PointerEvent::Down {
        x: from.0,
        y: from.1,
    });
    // A few interpolated move samples, like a real pointer would produce.
    for i in 1..=4 {
        let t = i as f64 / 4.0;
        session.handle_pointer_event(PointerEvent::Move {
            x: from.0 + (to.0 - from.0) * t,
            y: from.1 + (to.1 - from.1) * t,
        });
    }
    session.handle_pointer_event(PointerEvent::Up { x: to.0, y: to.1 });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut session = SketchSession::new()?;

    // Two rooms with a shared wall.
    session.set_tool(ToolKind::Rectangle);
    drag(&mut session, (100.0, 100.0), (400.0, 400.0));
    drag(&mut session, (400.0, 100.0), (640.0, 400.0));
    session.set_tool(ToolKind::Line);
    drag(&mut session, (100.0, 400.0), (640.0, 400.0));

    // A round table in the first room.
    session.set_tool(ToolKind::Circle);
    session.set_color(COLOR_PALETTE[3]);
    drag(&mut session, (240.0, 260.0), (280.0, 260.0));

    // Freehand door swing, then erase part of it.
    session.set_tool(ToolKind::Freehand);
    drag(&mut session, (400.0, 220.0), (430.0, 250.0));
    session.set_tool(ToolKind::Eraser);
    drag(&mut session, (425.0, 245.0), (435.0, 255.0));

    let data_url = session.save()?;
    let encoded = data_url
        .strip_prefix("data:image/png;base64,")
        .expect("save() returns a PNG data URL");
    let bytes = STANDARD.decode(encoded)?;
    std::fs::write("floorplan.png", &bytes)?;
    log::info!("wrote floorplan.png ({} bytes)", bytes.len());

    Ok(())
}
