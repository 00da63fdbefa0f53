use crate::error::{check_dimensions, Result};

/// Lower bound of the display range.
pub const DISPLAY_MIN: f64 = -5.0;
/// Upper bound of the display range.
pub const DISPLAY_MAX: f64 = 5.0;

/// Axes whose spread is below this are treated as constant.
const MIN_SPAN: f64 = 1e-10;

/// Rescale every axis independently into `[DISPLAY_MIN, DISPLAY_MAX]`.
///
/// Each axis is mapped linearly from its own `[min, max]`. A constant axis
/// (spread below `1e-10`) maps entirely to `0`.
pub fn normalize(points: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let k = check_dimensions(points)?;
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let mut out: Vec<Vec<f64>> = points.to_vec();
    let width = DISPLAY_MAX - DISPLAY_MIN;

    for axis in 0..k {
        let (min, max) = points
            .iter()
            .map(|p| p[axis])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let span = max - min;

        for p in &mut out {
            p[axis] = if span < MIN_SPAN {
                0.0
            } else {
                (p[axis] - min) / span * width + DISPLAY_MIN
            };
        }
    }

    Ok(out)
}
