use ndarray::{Array, Array2, ArrayD, IxDyn};
use rayon::prelude::*;

use crate::form::{FormError, FunctionInputs, FunctionOutput, FunctionSpec, ParamSpec, Result};
use crate::model::{DataKind, LayerData};

use super::util::{gaussian_kernel, min_max, neighborhood_offsets, row_major_strides};

pub fn gaussian_blur_spec() -> FunctionSpec {
    FunctionSpec::new("gaussian_blur")
        .describe("Gaussian blur across all axes of an image.")
        .param(ParamSpec::layer("image", DataKind::Image))
        .param(ParamSpec::float("sigma", 1.0).describe("Standard deviation of the kernel."))
        .produces(DataKind::Image)
}

pub fn gaussian_blur_tool(inputs: &FunctionInputs) -> Result<Option<FunctionOutput>> {
    let image = inputs.image("image")?;
    let sigma = inputs.float_or("sigma", 1.0) as f32;
    let blurred = gaussian_blur(image, sigma)?;
    Ok(Some(LayerData::Image(blurred).into()))
}

pub fn threshold_otsu_spec() -> FunctionSpec {
    FunctionSpec::new("threshold_otsu")
        .describe("Binary segmentation using Otsu's method.")
        .param(ParamSpec::layer("image", DataKind::Image))
        .produces(DataKind::Labels)
}

pub fn threshold_otsu_tool(inputs: &FunctionInputs) -> Result<Option<FunctionOutput>> {
    let image = inputs.image("image")?;
    let labels = threshold_otsu(image)?;
    Ok(Some(LayerData::Labels(labels).into()))
}

pub fn local_maxima_spec() -> FunctionSpec {
    FunctionSpec::new("local_maxima")
        .describe("Coordinates of local intensity maxima.")
        .param(ParamSpec::layer("image", DataKind::Image))
        .param(ParamSpec::int("radius", 2).describe("Neighborhood radius in pixels."))
        .param(
            ParamSpec::float("threshold_rel", 0.1)
                .describe("Minimum peak height relative to the image range."),
        )
        .produces(DataKind::Points)
}

pub fn local_maxima_tool(inputs: &FunctionInputs) -> Result<Option<FunctionOutput>> {
    let image = inputs.image("image")?;
    let radius = inputs.int_or("radius", 2);
    if radius < 1 {
        return Err(FormError::invalid("radius", "must be >= 1"));
    }
    let threshold_rel = inputs.float_or("threshold_rel", 0.1) as f32;
    let points = local_maxima(image, radius as usize, threshold_rel);
    Ok(Some(LayerData::Points(points).into()))
}

pub fn gaussian_blur(image: &ArrayD<f32>, sigma: f32) -> Result<ArrayD<f32>> {
    if sigma.is_nan() || sigma < 0.0 {
        return Err(FormError::invalid("sigma", "must be >= 0"));
    }
    if sigma <= f32::EPSILON || image.is_empty() {
        return Ok(image.clone());
    }

    let shape = image.shape().to_vec();
    // Past the longest axis the kernel only grows, the image does not.
    let longest = shape.iter().copied().max().unwrap_or(1) as f32;
    let kernel = gaussian_kernel(sigma.min(longest));
    let radius = (kernel.len() / 2) as isize;
    let strides = row_major_strides(&shape);
    let mut current = image.iter().copied().collect::<Vec<_>>();

    for axis in 0..shape.len() {
        if shape[axis] <= 1 {
            continue;
        }
        current = blur_axis(&current, &shape, &strides, axis, &kernel, radius);
    }

    Array::from_shape_vec(IxDyn(&shape), current)
        .map_err(|error| FormError::failed(format!("failed to rebuild blurred image: {error}")))
}

fn blur_axis(
    input: &[f32],
    shape: &[usize],
    strides: &[usize],
    axis: usize,
    kernel: &[f32],
    radius: isize,
) -> Vec<f32> {
    let axis_len = shape[axis];
    let axis_stride = strides[axis];
    let lane_count = input.len() / axis_len;
    let lane_bases = (0..lane_count)
        .map(|lane| lane_base_offset(lane, axis, shape, strides))
        .collect::<Vec<_>>();

    let lane_results = lane_bases
        .par_iter()
        .map(|base| {
            (0..axis_len)
                .map(|coord| {
                    kernel
                        .iter()
                        .enumerate()
                        .map(|(kernel_index, weight)| {
                            let candidate = coord as isize + kernel_index as isize - radius;
                            let clamped = candidate.clamp(0, axis_len as isize - 1) as usize;
                            input[*base + clamped * axis_stride] * *weight
                        })
                        .sum::<f32>()
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut output = vec![0.0_f32; input.len()];
    for (base, lane_output) in lane_bases.iter().zip(lane_results) {
        for (coord, value) in lane_output.into_iter().enumerate() {
            output[*base + coord * axis_stride] = value;
        }
    }
    output
}

fn lane_base_offset(lane_index: usize, axis: usize, shape: &[usize], strides: &[usize]) -> usize {
    let mut remainder = lane_index;
    let mut base = 0usize;
    for dimension in (0..shape.len()).rev() {
        if dimension == axis {
            continue;
        }
        let size = shape[dimension];
        base += (remainder % size) * strides[dimension];
        remainder /= size;
    }
    base
}

pub fn otsu_threshold(values: &[f32]) -> f32 {
    let mut histogram = [0_u64; 256];
    let (min, max) = min_max(values);
    let span = (max - min).max(f32::EPSILON);

    for value in values {
        let normalized = ((*value - min) / span).clamp(0.0, 1.0);
        histogram[(normalized * 255.0).round() as usize] += 1;
    }

    let total = values.len() as f64;
    let weighted_sum = histogram
        .iter()
        .enumerate()
        .map(|(index, count)| index as f64 * *count as f64)
        .sum::<f64>();

    let mut sum_background = 0.0_f64;
    let mut weight_background = 0.0_f64;
    let mut best_variance = -1.0_f64;
    let mut best_threshold = 0usize;

    for (index, count) in histogram.iter().enumerate() {
        weight_background += *count as f64;
        if weight_background == 0.0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0.0 {
            break;
        }

        sum_background += index as f64 * *count as f64;
        let mean_background = sum_background / weight_background;
        let mean_foreground = (weighted_sum - sum_background) / weight_foreground;
        let between =
            weight_background * weight_foreground * (mean_background - mean_foreground).powi(2);
        if between > best_variance {
            best_variance = between;
            best_threshold = index;
        }
    }

    // Pixels in the threshold bin belong to the background.
    ((best_threshold as f32 + 0.5) / 255.0) * span + min
}

/// Labels pixels above the Otsu threshold with 1. Constant images are all
/// background.
pub fn threshold_otsu(image: &ArrayD<f32>) -> Result<ArrayD<u32>> {
    let values = image.iter().copied().collect::<Vec<_>>();
    let (min, max) = min_max(&values);
    if max <= min {
        return Ok(ArrayD::zeros(image.raw_dim()));
    }
    let threshold = otsu_threshold(&values);
    tracing::debug!(threshold, "otsu threshold");
    let labels = values
        .par_iter()
        .map(|value| u32::from(*value > threshold))
        .collect::<Vec<_>>();
    Array::from_shape_vec(image.raw_dim(), labels)
        .map_err(|error| FormError::failed(format!("failed to rebuild label image: {error}")))
}

/// One row per maximum, in row-major order of the pixel grid. A pixel is a
/// maximum when no neighbor within `radius` is brighter; on plateaus only the
/// first pixel in row-major order is kept. `radius` is capped at the longest
/// axis, beyond which every pixel is already in the neighborhood.
pub fn local_maxima(image: &ArrayD<f32>, radius: usize, threshold_rel: f32) -> Array2<f64> {
    let shape = image.shape().to_vec();
    let rank = shape.len();
    let values = image.iter().copied().collect::<Vec<_>>();
    let (min, max) = min_max(&values);
    if values.is_empty() || max <= min {
        return Array2::zeros((0, rank));
    }

    let floor = min + threshold_rel.clamp(0.0, 1.0) * (max - min);
    let strides = row_major_strides(&shape);
    let longest = shape.iter().copied().max().unwrap_or(1);
    let radius = radius.clamp(1, longest.saturating_sub(1).max(1));
    let offsets = neighborhood_offsets(rank, radius);

    let peaks = (0..values.len())
        .into_par_iter()
        .filter(|&index| {
            let value = values[index];
            if value <= min || value < floor {
                return false;
            }
            let coords = unravel(index, &shape);
            offsets.iter().all(|offset| {
                match neighbor_index(&coords, offset, &shape, &strides) {
                    Some(neighbor) if neighbor < index => value > values[neighbor],
                    Some(neighbor) => value >= values[neighbor],
                    None => true,
                }
            })
        })
        .collect::<Vec<_>>();

    let mut points = Array2::zeros((peaks.len(), rank));
    for (row, index) in peaks.into_iter().enumerate() {
        for (axis, coord) in unravel(index, &shape).into_iter().enumerate() {
            points[[row, axis]] = coord as f64;
        }
    }
    points
}

fn unravel(mut index: usize, shape: &[usize]) -> Vec<usize> {
    let mut coords = vec![0usize; shape.len()];
    for axis in (0..shape.len()).rev() {
        coords[axis] = index % shape[axis];
        index /= shape[axis];
    }
    coords
}

fn neighbor_index(
    coords: &[usize],
    offset: &[isize],
    shape: &[usize],
    strides: &[usize],
) -> Option<usize> {
    let mut index = 0usize;
    for axis in 0..coords.len() {
        let coord = coords[axis] as isize + offset[axis];
        if coord < 0 || coord >= shape[axis] as isize {
            return None;
        }
        index += coord as usize * strides[axis];
    }
    Some(index)
}
