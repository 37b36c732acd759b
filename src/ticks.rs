//! Nice-number tick selection and tick label formatting.

use crate::render::{round_away_from_zero, round_half_away};

/// Candidate step multipliers, ascending. The selector rounds the residual
/// up to the next strictly greater entry.
const STEP_LADDER: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Select "nice" tick values covering `[min, max]`.
///
/// `most` is a soft upper bound on the tick count; values below 1 are
/// clamped to 1. Steps are chosen from 1/2/5/10 times a power of ten, the
/// first tick is anchored at the nearest step multiple at or below `min`,
/// and ticks are generated until `max` is covered.
#[must_use]
pub fn best_ticks(min: f64, max: f64, most: usize) -> Vec<f64> {
    let most = most.max(1);
    let range = max - min;
    if range == 0.0 {
        return vec![min];
    }
    let min_step = range / most as f64;
    let magnitude = 10f64.powf(min_step.log10().floor());
    let residual = min_step / magnitude;
    let step = STEP_LADDER.iter().copied().find(|s| residual < *s).unwrap_or(10.0) * magnitude;

    // sign-aware anchoring so negative ranges snap downward
    let sign = 1f64.copysign(min);
    let mut start = step * round_half_away(min.abs() / step) as f64 * sign;
    if start > min {
        start -= step;
    }
    let count = round_away_from_zero((max - start) / step) + 1;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Format a tick value with up to three significant digits, matching the
/// `%.3g` printf conversion (scientific notation outside `[1e-4, 1e3)`).
#[must_use]
pub fn format_tick(value: f64) -> String {
    format_sig(value, 3)
}

fn format_sig(value: f64, sig: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let mut exponent = value.abs().log10().floor() as i32;
    // round to `sig` significant digits first; the carry can push the value
    // into the next decade (999.9 -> 1000 -> 1e+03)
    let scale = 10f64.powi(sig as i32 - 1 - exponent);
    let rounded = (value * scale).round() / scale;
    exponent = exponent.max(rounded.abs().log10().floor() as i32);
    if exponent < -4 || exponent >= sig as i32 {
        let mantissa = rounded / 10f64.powi(exponent);
        let mantissa = trim_zeros(&format!("{mantissa:.*}", sig - 1));
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{exp_sign}{:02}", exponent.abs())
    } else {
        let decimals = (sig as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{rounded:.decimals$}"))
    }
}

fn trim_zeros(formatted: &str) -> String {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted.to_string()
    }
}
