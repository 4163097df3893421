//! Low-level DSP primitives for the realtime path.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! call directly from an audio interrupt. All arithmetic is fixed point; the
//! only divisions happen when parameters change.

/// Q29 helpers and the integer exponential behind rate derivation.
pub mod fixed;
/// Attack/release level tracker.
pub mod level;

pub use level::LevelState;
