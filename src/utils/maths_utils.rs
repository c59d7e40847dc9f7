/// Default tolerance for comparing derived scene coordinates.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Interpolates between `a` and `b`. `t` outside 0..=1 extrapolates.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Folds a frequency ratio into the octave above 1.0 (`[1, 2)` for ratios below 2).
/// Ratios already at or above 1.0 are left alone so an explicit octave still maps to 2.0.
pub fn fold_into_octave(mut ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return ratio;
    }
    while ratio < 1.0 - GEOMETRY_EPSILON {
        ratio *= 2.0;
    }
    ratio
}
