use std::f32::consts::PI;

pub(crate) fn min_max(values: &[f32]) -> (f32, f32) {
    let mut iter = values.iter().copied();
    let first = iter.next().unwrap_or(0.0);
    iter.fold((first, first), |(min, max), value| (min.min(value), max.max(value)))
}

/// Normalized 1D kernel spanning three standard deviations on each side.
pub(crate) fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (sigma * 3.0).ceil().max(1.0) as i32;
    let mut kernel = (-radius..=radius)
        .map(|offset| {
            let distance = offset as f32;
            (-(distance * distance) / (2.0 * sigma * sigma)).exp() / (sigma * (2.0 * PI).sqrt())
        })
        .collect::<Vec<_>>();
    let sum = kernel.iter().sum::<f32>().max(f32::EPSILON);
    kernel.iter_mut().for_each(|value| *value /= sum);
    kernel
}

pub(crate) fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for index in (0..shape.len().saturating_sub(1)).rev() {
        strides[index] = strides[index + 1] * shape[index + 1];
    }
    strides
}

/// Every offset in the cube of side `2 * radius + 1`, origin excluded.
pub(crate) fn neighborhood_offsets(rank: usize, radius: usize) -> Vec<Vec<isize>> {
    let radius = radius as isize;
    let mut offsets = vec![Vec::with_capacity(rank)];
    for _ in 0..rank {
        offsets = offsets
            .into_iter()
            .flat_map(|prefix| {
                (-radius..=radius).map(move |offset| {
                    let mut next = prefix.clone();
                    next.push(offset);
                    next
                })
            })
            .collect();
    }
    offsets.retain(|offset| offset.iter().any(|value| *value != 0));
    offsets
}
