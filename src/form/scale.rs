pub const DEFAULT_POINT_SIZE: f64 = 1.0;

/// Aligns a source scale to `ndim` trailing axes: longer scales keep their
/// last `ndim` entries, shorter ones are left-padded with 1.
pub fn align_scale(scale: &[f64], ndim: usize) -> Vec<f64> {
    if scale.len() >= ndim {
        return scale[scale.len() - ndim..].to_vec();
    }
    let mut aligned = vec![1.0; ndim - scale.len()];
    aligned.extend_from_slice(scale);
    aligned
}

/// Point size as a fraction of the largest displayed dimension, falling back
/// to the points' own extent and then to `DEFAULT_POINT_SIZE`.
pub fn point_size(display_extent: &[f64], data_extent: &[f64], fraction: f64) -> f64 {
    let reference = match largest(display_extent) {
        value if value > 0.0 => value,
        _ => largest(data_extent),
    };
    if reference > 0.0 {
        reference * fraction
    } else {
        DEFAULT_POINT_SIZE
    }
}

fn largest(extent: &[f64]) -> f64 {
    extent
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max)
}
