//! Grid axis generation for the loss surface.

/// `steps` evenly spaced points from `min` to `max` (both inclusive).
///
/// `value(i) = min + (max − min) · i / (steps − 1)`. Returns an empty vector
/// when `steps < 2`, since a one-point axis has no spacing.
pub fn lin_space(min: f64, max: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return Vec::new();
    }
    let denom = (steps - 1) as f64;
    (0..steps)
        .map(|i| min + (max - min) * i as f64 / denom)
        .collect()
}
