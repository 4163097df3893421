pub mod control; // Realtime parameter hand-off
pub mod dsp;
mod error;
pub mod io; // Text parameter parsing
pub mod patch;

pub use dsp::LevelState;
pub use error::Error;
pub use patch::LevelParams;

/// Fractional bits of the level domain.
pub const LEVEL_BITS: u32 = 29;
/// Largest representable level.
pub const MAX_LEVEL: i32 = (1 << LEVEL_BITS) - 1;
/// Right shift that aligns a Q31 gain value with the Q29 level scale.
pub const LEVEL_TO_GAIN_SHIFT: u32 = 31 - LEVEL_BITS;

/// The fixed sample clock the tracker runs on.
pub const SAMPLE_RATE: u32 = 48_000;
pub const MICRO_SEC_PER_SAMPLE: u32 = 1_000_000 / SAMPLE_RATE;
