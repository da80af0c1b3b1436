//! The signal graph: gates, wires and the store that owns them.
//!
//! Entities live in fixed-capacity generational pools and refer to each
//! other only by handle, so freeing a slot can never leave a silently
//! aliased reference behind — a stale handle simply stops resolving.

/// Gate kinds, polarity and the note mapping on output gates.
pub mod gate;
/// Generational slot pools and typed handles.
pub mod pool;
/// The store itself: allocation, hit-testing, wiring, clearing.
pub mod store;
/// Directed edges with their drawn paths.
pub mod wire;

pub use gate::{Gate, GateKind, LogicOp, NoteSpec, Polarity};
pub use pool::{Handle, Pool, PoolError};
pub use store::{ConnectError, Graph, HIT_RADIUS_SQ};
pub use wire::Wire;

/// Handle to an active gate.
pub type GateId = Handle<Gate>;
/// Handle to an active wire.
pub type WireId = Handle<Wire>;
