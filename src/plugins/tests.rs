use ndarray::{ArrayD, IxDyn, array};

use super::util::{gaussian_kernel, neighborhood_offsets, row_major_strides};
use super::*;
use crate::registry::{EntryKind, ToolsRegistry};

#[test]
fn gaussian_kernel_is_normalized() {
    let kernel = gaussian_kernel(1.5);
    let sum = kernel.iter().sum::<f32>();
    assert!((sum - 1.0).abs() < 1e-5);
    assert_eq!(kernel.len() % 2, 1);
}

#[test]
fn strides_and_offsets_follow_row_major_layout() {
    assert_eq!(row_major_strides(&[2, 3, 4]), vec![12, 4, 1]);
    assert_eq!(neighborhood_offsets(2, 1).len(), 8);
    assert!(neighborhood_offsets(2, 1).iter().all(|offset| offset != &vec![0, 0]));
}

#[test]
fn gaussian_blur_keeps_shape_and_mass() {
    let mut image = ArrayD::<f32>::zeros(IxDyn(&[9, 9]));
    image[[4, 4]] = 1.0;
    let blurred = gaussian_blur(&image, 1.0).expect("blur");
    assert_eq!(blurred.shape(), &[9, 9]);
    let total = blurred.iter().sum::<f32>();
    assert!((total - 1.0).abs() < 1e-3);
    assert!(blurred[[4, 4]] < 1.0);
    assert!(blurred[[4, 5]] > 0.0);
}

#[test]
fn gaussian_blur_rejects_negative_sigma() {
    let image = ArrayD::<f32>::zeros(IxDyn(&[3, 3]));
    assert!(gaussian_blur(&image, -1.0).is_err());
    assert_eq!(gaussian_blur(&image, 0.0).expect("identity"), image);
}

#[test]
fn gaussian_blur_caps_sigma_at_longest_axis() {
    let mut image = ArrayD::<f32>::zeros(IxDyn(&[7, 5]));
    image[[1, 3]] = 2.0;
    image[[5, 0]] = 1.0;
    let capped = gaussian_blur(&image, 7.0).expect("blur");
    assert_eq!(gaussian_blur(&image, 1e30).expect("huge sigma"), capped);
    assert_eq!(gaussian_blur(&image, f32::INFINITY).expect("infinite sigma"), capped);
    assert!(capped.iter().all(|value| value.is_finite()));
}

#[test]
fn otsu_separates_two_populations() {
    let image = array![[0.0_f32, 0.1, 0.9], [1.0, 0.05, 0.95]].into_dyn();
    let labels = threshold_otsu(&image).expect("threshold");
    assert_eq!(labels, array![[0_u32, 0, 1], [1, 0, 1]].into_dyn());
}

#[test]
fn otsu_of_constant_image_is_background() {
    let image = ArrayD::<f32>::from_elem(IxDyn(&[4, 4]), 0.3);
    let labels = threshold_otsu(&image).expect("threshold");
    assert!(labels.iter().all(|label| *label == 0));
}

#[test]
fn local_maxima_finds_sample_blobs() {
    let points = local_maxima(&sample_image(), 3, 0.2);
    assert_eq!(points.ncols(), 2);
    let found = points
        .rows()
        .into_iter()
        .map(|row| (row[0] as usize, row[1] as usize))
        .collect::<Vec<_>>();
    assert!(found.contains(&(16, 16)));
    assert!(found.contains(&(40, 24)));
    assert!(found.contains(&(28, 48)));
    assert_eq!(found.len(), 3);
}

#[test]
fn local_maxima_keeps_one_pixel_per_plateau() {
    let image = array![[0.0_f32, 1.0, 1.0, 0.0], [0.0, 0.0, 0.0, 0.0]].into_dyn();
    let points = local_maxima(&image, 1, 0.0);
    assert_eq!(points, array![[0.0, 1.0]]);
}

#[test]
fn local_maxima_caps_radius_at_longest_axis() {
    let image = array![
        [0.0_f32, 0.2, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.7, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ]
    .into_dyn();
    let full_window = local_maxima(&image, 5, 0.0);
    assert_eq!(full_window, array![[3.0, 2.0]]);
    assert_eq!(local_maxima(&image, 1_000_000, 0.0), full_window);
    assert_eq!(local_maxima(&image, usize::MAX, 0.0), full_window);
    assert_eq!(local_maxima(&image, 1, 0.0).nrows(), 3);
}

#[test]
fn builtin_entries_cover_every_kind() {
    let mut registry = ToolsRegistry::new();
    register_builtin(&mut registry);
    assert_eq!(registry.len(), 7);
    assert_eq!(
        registry.get("Utilities>Action").map(|entry| entry.kind()),
        Some(EntryKind::Action)
    );
    assert_eq!(
        registry.get("Utilities > Widget").map(|entry| entry.kind()),
        Some(EntryKind::DockWidget)
    );
    let listing = registry.list_registered();
    let function = listing
        .iter()
        .find(|listing| listing.path == "Utilities>Function")
        .expect("function entry");
    assert_eq!(function.module, "image_tools_menu::plugins::utilities");
}
