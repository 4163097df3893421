#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User-facing tracker settings, as they would be stored or sent around.
///
/// Time constants are in microseconds, the threshold in percent of
/// `MAX_LEVEL`. `LevelState::from_params` turns these into the fixed-point
/// form the realtime path reads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    pub attack_micro_sec: u32,
    pub release_micro_sec: u32,
    pub threshold_percent: u8,
}

impl LevelParams {
    pub fn new(attack_micro_sec: u32, release_micro_sec: u32, threshold_percent: u8) -> Self {
        Self {
            attack_micro_sec,
            release_micro_sec,
            threshold_percent,
        }
    }
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            attack_micro_sec: 1_000,    // 1ms
            release_micro_sec: 100_000, // 100ms
            threshold_percent: 50,
        }
    }
}
