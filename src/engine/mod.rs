//! The propagation engine and the clock that drives it.

/// Tick counter, input-rail waveforms and transport control.
pub mod clock;
/// Polarity resolution and the depth-bounded bang traversal.
pub mod propagate;

pub use clock::Clock;
pub use propagate::{resolve, Propagator, MAX_DEPTH};
