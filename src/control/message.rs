#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::level::{clamp_threshold, derive_rate, threshold_from_percent, LevelState};

/// A parameter change as a user asks for it: decoded from text or requested
/// through a handle. Time constants are in microseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LevelCommand {
    SetAttack(u32),
    SetRelease(u32),
    SetThreshold(i32),
    SetThresholdPercent(u8),
    Reset,
}

impl LevelCommand {
    /// Apply the change directly, off the audio thread. Parameter changes keep
    /// the current level.
    pub fn apply(self, state: &mut LevelState) {
        match self {
            LevelCommand::SetAttack(micro_sec) => state.set_attack_micro_sec(micro_sec),
            LevelCommand::SetRelease(micro_sec) => state.set_release_micro_sec(micro_sec),
            LevelCommand::SetThreshold(threshold) => state.set_threshold(threshold),
            LevelCommand::SetThresholdPercent(percent) => state.set_threshold_percent(percent),
            LevelCommand::Reset => state.reset(),
        }
    }

    /// Derive rates and clamp thresholds for a tracker sampled every
    /// `period_micro_sec`, so the audio thread only has to store the result.
    pub fn prepare(self, period_micro_sec: u32) -> LevelMessage {
        match self {
            LevelCommand::SetAttack(micro_sec) => LevelMessage::SetAttack {
                micro_sec,
                rate: derive_rate("attack", period_micro_sec, micro_sec),
            },
            LevelCommand::SetRelease(micro_sec) => LevelMessage::SetRelease {
                micro_sec,
                rate: derive_rate("release", period_micro_sec, micro_sec),
            },
            LevelCommand::SetThreshold(threshold) => {
                let (threshold, percent) = clamp_threshold(threshold);
                LevelMessage::SetThreshold { threshold, percent }
            }
            LevelCommand::SetThresholdPercent(percent) => {
                let (threshold, percent) = threshold_from_percent(percent);
                LevelMessage::SetThreshold { threshold, percent }
            }
            LevelCommand::Reset => LevelMessage::Reset,
        }
    }
}

/// A fully derived parameter change, ready for the audio thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LevelMessage {
    SetAttack { micro_sec: u32, rate: i32 },
    SetRelease { micro_sec: u32, rate: i32 },
    SetThreshold { threshold: i32, percent: u8 },
    Reset,
}

impl LevelMessage {
    /// Store the change. Realtime-safe: no logging, no division.
    #[inline]
    pub fn apply(self, state: &mut LevelState) {
        match self {
            LevelMessage::SetAttack { micro_sec, rate } => state.store_attack(micro_sec, rate),
            LevelMessage::SetRelease { micro_sec, rate } => state.store_release(micro_sec, rate),
            LevelMessage::SetThreshold { threshold, percent } => {
                state.store_threshold(threshold, percent)
            }
            LevelMessage::Reset => state.reset(),
        }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<LevelMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<LevelMessage> {
    fn pop(&mut self) -> Option<LevelMessage> {
        Consumer::pop(self).ok()
    }
}
