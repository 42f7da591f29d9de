//! Grundriss Render Library
//!
//! CPU raster pipeline for the Grundriss sketch engine: the persistent
//! interactive surface, the drawing session that wires pointer events
//! through the tool state machine, and the blueprint-styled PNG export.

pub mod error;
pub mod export;
mod glyphs;
pub mod session;
pub mod surface;

pub use error::{RenderError, RenderResult};
pub use export::{EXPORT_TITLE, export_data_url, render_export};
pub use session::SketchSession;
pub use surface::{CANVAS_HEIGHT, CANVAS_WIDTH, Surface};
