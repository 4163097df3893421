//! Q-format arithmetic for the level domain.

/*
Fixed-Point Levels
==================

Everything the tracker stores is an integer. Fractions are expressed in
Q-format: a value `v` with `F` fractional bits stands for `v / 2^F`.

  Q29      The level domain. 1.0 is `1 << 29`, the largest level is
           `(1 << 29) - 1`. Smoothing rates share this scale, so a rate of
           `RATE_ONE` means "jump straight to the target".

  Q31      Internal scale used while deriving rates. Two extra bits keep the
           exponential accurate before it is rounded down to Q29.


Time Constant to Rate
---------------------

A one-pole smoother with time constant tau, sampled every T seconds, moves
this fraction of the remaining distance per sample:

    rate = 1 - exp(-T / tau)

After tau seconds the output has covered 1 - 1/e ≈ 63% of a step.

We never touch floating point. `x = T / tau` is formed as a Q31 quotient and
exp(-x) is evaluated with range reduction:

    x = k·ln2 + r,   0 <= r < ln2
    exp(-x) = 2^-k · exp(-r)

exp(-r) comes from its Taylor series. With r < 0.7 the alternating terms
shrink fast; sixteen of them are far below one Q31 LSB. The 2^-k factor is a
plain right shift.

This only runs when parameters change, never per sample.
*/

use crate::{LEVEL_BITS, MAX_LEVEL};

/// 1.0 in the Q29 rate/level scale.
pub const RATE_ONE: i32 = 1 << LEVEL_BITS;

const EXP_FRAC_BITS: u32 = 31;
const EXP_ONE: u64 = 1 << EXP_FRAC_BITS;
/// ln(2) in Q31, rounded.
const LN2_Q31: u64 = 1_488_522_236;
const EXP_SERIES_TERMS: u64 = 16;

/// Computes `exp(-x)` where `x` and the result are Q31.
pub fn exp_neg_q31(x: u64) -> u64 {
    let k = x / LN2_Q31;
    if k > u64::from(EXP_FRAC_BITS) {
        return 0;
    }
    let r = x % LN2_Q31;

    let mut term = EXP_ONE;
    let mut sum = EXP_ONE as i64;
    for n in 1..=EXP_SERIES_TERMS {
        term = ((term * r) >> EXP_FRAC_BITS) / n;
        if term == 0 {
            break;
        }
        if n % 2 == 1 {
            sum -= term as i64;
        } else {
            sum += term as i64;
        }
    }

    let sum = sum.max(0) as u64;
    if k == 0 {
        sum
    } else {
        (sum + (1 << (k - 1))) >> k
    }
}

/// Per-sample smoothing rate (Q29) for a one-pole filter with the given time
/// constant, sampled every `period_micro_sec`.
///
/// A zero time constant snaps: the rate is `RATE_ONE`. Any other input yields
/// a rate in `1..=RATE_ONE`, non-increasing as the time constant grows.
pub fn smoothing_rate(period_micro_sec: u32, time_constant_micro_sec: u32) -> i32 {
    if time_constant_micro_sec == 0 {
        return RATE_ONE;
    }

    let x = (u64::from(period_micro_sec) << EXP_FRAC_BITS) / u64::from(time_constant_micro_sec);
    let decay = exp_neg_q31(x);

    let shift = EXP_FRAC_BITS - LEVEL_BITS;
    let rate = (EXP_ONE.saturating_sub(decay) + (1 << (shift - 1))) >> shift;
    rate.clamp(1, RATE_ONE as u64) as i32
}

/// Multiplies `value` by a Q29 coefficient, rounding to nearest.
#[inline(always)]
pub fn mul_q29(coeff: i32, value: i64) -> i64 {
    (i64::from(coeff) * value + (1 << (LEVEL_BITS - 1))) >> LEVEL_BITS
}

/// Scales a percentage (clamped to 0..=100) into the level domain, rounding
/// to nearest.
pub fn percent_to_level(percent: u8) -> i32 {
    let percent = i64::from(percent.min(100));
    ((percent * i64::from(MAX_LEVEL) + 50) / 100) as i32
}

/// Expresses a level as a whole percentage of `MAX_LEVEL`, rounding down.
pub fn level_to_percent(level: i32) -> u8 {
    let level = i64::from(level.clamp(0, MAX_LEVEL));
    (level * 100 / i64::from(MAX_LEVEL)) as u8
}
