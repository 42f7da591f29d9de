//! Grundriss Core Library
//!
//! Platform-agnostic data structures and interaction logic for the
//! Grundriss floor-plan sketch engine: the shape model, grid snapping,
//! pointer input translation, the tool/gesture state machine, and the
//! shape list with linear undo.

pub mod input;
pub mod shapes;
pub mod sketch;
pub mod snap;
pub mod tools;

pub use input::{PointerEvent, Viewport, canvas_point};
pub use sketch::Sketch;
pub use snap::{GRID_SIZE, snap_to_grid};
pub use tools::{COLOR_PALETTE, GestureState, ToolKind, ToolManager};
