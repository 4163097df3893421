use log::{debug, warn};

use crate::{
    dsp::fixed::{self, RATE_ONE},
    patch::LevelParams,
    MAX_LEVEL, MICRO_SEC_PER_SAMPLE,
};

/*
Attack/Release Level Tracking
=============================

This module follows the amplitude of a signal, one sample at a time, so a
downstream gain stage can tell how loud things are and how far above the
threshold they went.

Vocabulary
----------

  level       The tracked envelope magnitude, Q29 fixed point in
              [0, MAX_LEVEL]. This is what the gain stage reads.

  magnitude   |xn|, the rectified input sample. Envelope followers care about
              how big the signal is, not which way it points.

  attack      How fast the level rises toward a louder input.

  release     How fast the level falls toward a quieter input.

  rate        Fraction of the gap between level and magnitude covered in one
              sample, Q29. Derived once from a time constant (see `fixed`).

  threshold   The level above which the gain stage starts reducing gain.
              Canonical in Q29; the percentage is kept for display.


The Update
----------

Every sample:

    magnitude = |xn|
    rate      = magnitude > level ? attack_rate : release_rate
    level    += rate × (magnitude - level)

One compare, one multiply-add, one clamp. No division, no allocation, no
stored mode: the attack/release choice is re-made on each call.

  Level
   M ┤           ╭────────────
     │         ╭─╯            ╲
     │       ╭─╯                ╲___
     │      ╱                        ╲_______
   0 ┼─────╯                                 ───→ Time
          attack (fast)         release (slow)

The product is rounded rather than truncated. Truncating toward −∞ would bias
every step downward, so a steady tone would settle just below its true level.

With `rate <= 1.0` a step can never overshoot the magnitude, so a rising input
gives a non-decreasing level and a falling input a non-increasing one. The
final clamp only matters for magnitudes beyond the level domain, which are
clipped to MAX_LEVEL up front.
*/

/// Per-channel envelope tracker state.
///
/// The `*_micro_sec` and `threshold_percent` fields are for display only; the
/// per-sample path reads the derived rates and `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelState {
    level: i32,
    attack_micro_sec: u32,
    attack_rate: i32,
    release_micro_sec: u32,
    release_rate: i32,
    threshold_percent: u8,
    threshold: i32,
    period_micro_sec: u32,
}

impl LevelState {
    /// Create a tracker on the crate's fixed sample clock.
    pub fn new(attack_micro_sec: i32, release_micro_sec: i32, threshold: i32) -> Self {
        let mut state = Self::zeroed();
        state.init(attack_micro_sec, release_micro_sec, threshold);
        state
    }

    pub fn from_params(params: &LevelParams) -> Self {
        let mut state = Self::zeroed();
        state.init_from_params(params);
        state
    }

    fn zeroed() -> Self {
        Self {
            level: 0,
            attack_micro_sec: 0,
            attack_rate: RATE_ONE,
            release_micro_sec: 0,
            release_rate: RATE_ONE,
            threshold_percent: 0,
            threshold: 0,
            period_micro_sec: MICRO_SEC_PER_SAMPLE,
        }
    }

    /// (Re)initialise every field: time constants, threshold and a zero level.
    ///
    /// Negative time constants are treated as zero, which snaps instantly.
    /// Thresholds outside `[0, MAX_LEVEL]` are clamped.
    pub fn init(&mut self, attack_micro_sec: i32, release_micro_sec: i32, threshold: i32) {
        self.init_with_period(
            MICRO_SEC_PER_SAMPLE,
            attack_micro_sec,
            release_micro_sec,
            threshold,
        );
    }

    /// Like [`init`](Self::init), for a sample clock other than `SAMPLE_RATE`.
    pub fn init_with_period(
        &mut self,
        period_micro_sec: u32,
        attack_micro_sec: i32,
        release_micro_sec: i32,
        threshold: i32,
    ) {
        self.configure(
            period_micro_sec,
            clamp_time_constant("attack", attack_micro_sec),
            clamp_time_constant("release", release_micro_sec),
            threshold,
        );
    }

    pub fn init_from_params(&mut self, params: &LevelParams) {
        self.configure(
            MICRO_SEC_PER_SAMPLE,
            params.attack_micro_sec,
            params.release_micro_sec,
            fixed::percent_to_level(params.threshold_percent),
        );
    }

    fn configure(
        &mut self,
        period_micro_sec: u32,
        attack_micro_sec: u32,
        release_micro_sec: u32,
        threshold: i32,
    ) {
        self.period_micro_sec = period_micro_sec;
        self.level = 0;
        self.set_attack_micro_sec(attack_micro_sec);
        self.set_release_micro_sec(release_micro_sec);
        self.set_threshold(threshold);
    }

    /// Re-derive the attack rate. The tracked level is left alone.
    pub fn set_attack_micro_sec(&mut self, attack_micro_sec: u32) {
        let rate = derive_rate("attack", self.period_micro_sec, attack_micro_sec);
        self.store_attack(attack_micro_sec, rate);
    }

    /// Re-derive the release rate. The tracked level is left alone.
    pub fn set_release_micro_sec(&mut self, release_micro_sec: u32) {
        let rate = derive_rate("release", self.period_micro_sec, release_micro_sec);
        self.store_release(release_micro_sec, rate);
    }

    /// Set the threshold in the level domain; the display percentage follows.
    pub fn set_threshold(&mut self, threshold: i32) {
        let (threshold, percent) = clamp_threshold(threshold);
        self.store_threshold(threshold, percent);
    }

    /// Set the threshold from a percentage of `MAX_LEVEL` (clamped to 100).
    pub fn set_threshold_percent(&mut self, percent: u8) {
        let (threshold, percent) = threshold_from_percent(percent);
        self.store_threshold(threshold, percent);
    }

    // Plain stores for values derived elsewhere. These run on the audio
    // thread when queued changes are applied, so they must not log or divide.

    pub(crate) fn store_attack(&mut self, attack_micro_sec: u32, attack_rate: i32) {
        self.attack_micro_sec = attack_micro_sec;
        self.attack_rate = attack_rate;
    }

    pub(crate) fn store_release(&mut self, release_micro_sec: u32, release_rate: i32) {
        self.release_micro_sec = release_micro_sec;
        self.release_rate = release_rate;
    }

    pub(crate) fn store_threshold(&mut self, threshold: i32, threshold_percent: u8) {
        self.threshold = threshold;
        self.threshold_percent = threshold_percent;
    }

    /// Drop the tracked level back to zero, keeping all parameters.
    pub fn reset(&mut self) {
        self.level = 0;
    }

    /// Advance the tracker by one sample and return the new level.
    ///
    /// Realtime-safe: bounded time, no allocation, no logging.
    #[inline]
    pub fn update(&mut self, xn: i32) -> i32 {
        let magnitude = i64::from(xn.unsigned_abs().min(MAX_LEVEL as u32));
        let level = i64::from(self.level);

        let rate = if magnitude > level {
            self.attack_rate
        } else {
            self.release_rate
        };

        let next = level + fixed::mul_q29(rate, magnitude - level);
        self.level = next.clamp(0, i64::from(MAX_LEVEL)) as i32;

        debug_assert!((0..=MAX_LEVEL).contains(&self.level));
        self.level
    }

    /// Run `update` over a block, writing each new level into `out`.
    ///
    /// Processes `min(input.len(), out.len())` samples.
    pub fn render(&mut self, input: &[i32], out: &mut [i32]) {
        for (level, &xn) in out.iter_mut().zip(input) {
            *level = self.update(xn);
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// True while the tracked level sits above the threshold.
    pub fn over_threshold(&self) -> bool {
        self.level > self.threshold
    }

    pub fn attack_micro_sec(&self) -> u32 {
        self.attack_micro_sec
    }

    pub fn attack_rate(&self) -> i32 {
        self.attack_rate
    }

    pub fn release_micro_sec(&self) -> u32 {
        self.release_micro_sec
    }

    pub fn release_rate(&self) -> i32 {
        self.release_rate
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn threshold_percent(&self) -> u8 {
        self.threshold_percent
    }

    pub fn period_micro_sec(&self) -> u32 {
        self.period_micro_sec
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::from_params(&LevelParams::default())
    }
}

fn clamp_time_constant(name: &str, micro_sec: i32) -> u32 {
    if micro_sec < 0 {
        warn!("{name} time {micro_sec}us is negative, snapping instead");
    }
    micro_sec.max(0) as u32
}

/// Smoothing rate for a time constant, logged for diagnostics.
pub(crate) fn derive_rate(name: &str, period_micro_sec: u32, micro_sec: u32) -> i32 {
    let rate = fixed::smoothing_rate(period_micro_sec, micro_sec);
    debug!("{name} {micro_sec}us -> rate {rate}");
    rate
}

/// Clamp a level-domain threshold, returning it with its display percentage.
pub(crate) fn clamp_threshold(threshold: i32) -> (i32, u8) {
    let clamped = threshold.clamp(0, MAX_LEVEL);
    if clamped != threshold {
        warn!("threshold {threshold} outside [0, {MAX_LEVEL}], using {clamped}");
    }
    (clamped, fixed::level_to_percent(clamped))
}

/// Scale a threshold percentage into the level domain, clamping to 100%.
pub(crate) fn threshold_from_percent(percent: u8) -> (i32, u8) {
    if percent > 100 {
        warn!("threshold {percent}% above 100%, using 100%");
    }
    (fixed::percent_to_level(percent), percent.min(100))
}
