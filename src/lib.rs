pub mod brush; // Interactive wire-drawing gesture
pub mod engine; // Polarity propagation and the clock driving it
pub mod geom;
pub mod graph; // Gates, wires and the pools that own them
pub mod io;

/// Fan-in/fan-out bound per gate.
pub const PORT_MAX: usize = 8;
/// Longest drawable wire path, in points.
pub const PATH_MAX: usize = 128;
/// Gate pool capacity.
pub const GATE_MAX: usize = 64;
/// Wire pool capacity.
pub const WIRE_MAX: usize = 64;

/// Model-space canvas size. Gate positions and brush strokes live in this
/// coordinate system; the renderer scales it onto whatever surface it has.
pub const CANVAS_WIDTH: i32 = 272;
pub const CANVAS_HEIGHT: i32 = 144;
