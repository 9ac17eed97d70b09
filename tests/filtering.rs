mod common;

use common::synthetic_image::{
    add_diagonal_interference, max_abs_diff, random_image, square_on_grey,
};
use num_complex::Complex64;
use spectral_image::filter::{
    apply_mask, centre_distance, filter_spatial, remove_peaks, BandKind, FilterMask, KernelMode,
};
use spectral_image::image::ImageF64;
use spectral_image::pipeline::{DenoiseParams, Experiment, MotionParams};
use spectral_image::spatial::{self, KernelKind};
use spectral_image::spectrum::magnitude;
use spectral_image::{ComplexBuffer, Normalization, SpectrumError, Transform2D, TransformOptions};

#[test]
fn band_pass_keeps_exactly_the_ring() {
    let (rows, cols) = (32, 64);
    let (inner, outer) = (3.0, 9.5);
    let t = Transform2D::default();
    let mut spec = t
        .forward(&ComplexBuffer::from_real(&random_image(cols, rows, 2)))
        .unwrap();
    let before = spec.clone();
    let mask = FilterMask::band(rows, cols, inner, outer, BandKind::Pass).unwrap();
    apply_mask(&mut spec, &mask).unwrap();
    for (r, c, z) in spec.indexed() {
        let d = centre_distance(rows, cols, r, c);
        if d >= inner && d <= outer {
            assert_eq!(z, before[(r, c)], "({r}, {c}) d={d}");
        } else {
            assert_eq!(z, Complex64::new(0.0, 0.0), "({r}, {c}) d={d}");
        }
    }
}

#[test]
fn mask_of_other_shape_is_rejected() {
    let mut spec = ComplexBuffer::new(16, 16);
    let mask = FilterMask::band(16, 8, 0.0, 2.0, BandKind::Pass).unwrap();
    let err = apply_mask(&mut spec, &mask).unwrap_err();
    assert!(matches!(err, SpectrumError::DimensionMismatch { .. }), "{err}");
}

#[test]
fn periodic_interference_is_removed() {
    common::init_logging();
    let clean = square_on_grey(64, 8, 100.0, 20.0);
    let mut noisy = clean.clone();
    add_diagonal_interference(&mut noisy, 8.0, 40.0);
    assert!(max_abs_diff(&noisy, &clean) > 35.0);

    let params = DenoiseParams {
        iterations: 2,
        ..Default::default()
    };
    let out = Experiment::Denoise(params)
        .run(&noisy, &Transform2D::default())
        .unwrap();
    let stage = out.report.peak_removal.as_ref().unwrap();
    assert!(stage.auto_radius);
    let mut positions: Vec<(usize, usize)> = stage.removed.iter().map(|p| (p.row, p.col)).collect();
    positions.sort_unstable();
    assert_eq!(positions, vec![(24, 24), (40, 40)]);

    let denoised = out.image("denoised").unwrap();
    let residual = max_abs_diff(denoised, &clean);
    assert!(residual < 2.0, "residual={residual}");
}

#[test]
fn peak_search_respects_the_window() {
    let mut spec = ComplexBuffer::new(16, 16);
    spec[(8, 8)] = Complex64::new(1e6, 0.0);
    spec[(8, 12)] = Complex64::new(10.0, 0.0);
    let window = FilterMask::band(16, 16, 0.0, 2.0, BandKind::Stop).unwrap();
    let removed = remove_peaks(&mut spec, &window, 3).unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!((removed[0].row, removed[0].col), (8, 12));
    assert_eq!(spec[(8, 8)], Complex64::new(1e6, 0.0));
}

#[test]
fn convolution_theorem_matches_spatial_filtering() {
    let img = random_image(20, 17, 8);
    let source = ComplexBuffer::from_real(&img);
    for kind in [KernelKind::Gaussian7, KernelKind::Laplacian, KernelKind::SobelY] {
        let kernel = kind.build();
        for normalization in [Normalization::Inverse, Normalization::Forward] {
            let t = Transform2D::new(TransformOptions::default().with_normalization(normalization));
            let corr = filter_spatial(&t, &source, &kernel, KernelMode::Correlation)
                .unwrap()
                .real_part();
            let diff = max_abs_diff(&corr, &spatial::correlate(&img, &kernel));
            assert!(diff < 1e-9, "{kind:?} {normalization:?} correlation diff={diff}");

            let conv = filter_spatial(&t, &source, &kernel, KernelMode::Convolution)
                .unwrap()
                .real_part();
            let diff = max_abs_diff(&conv, &spatial::convolve(&img, &kernel));
            assert!(diff < 1e-9, "{kind:?} {normalization:?} convolution diff={diff}");
        }
    }
}

#[test]
fn gaussian_low_pass_attenuates_high_frequencies() {
    let t = Transform2D::default();
    let mut spec = t
        .forward(&ComplexBuffer::from_real(&random_image(32, 32, 4)))
        .unwrap();
    let dc = spec[(16, 16)];
    let mask = FilterMask::gaussian(32, 32, 3.0, BandKind::Pass).unwrap();
    apply_mask(&mut spec, &mask).unwrap();
    assert_eq!(spec[(16, 16)], dc);
    let mag = magnitude(&spec);
    assert!(mag.get(0, 0) < 1e-6 * dc.norm());
}

#[test]
fn motion_blur_preserves_mean_scaled_by_exposure() {
    let img = ImageF64::from_fn(32, 32, |_, _| 80.0);
    let mut params = MotionParams::default();
    params.blur.t = 0.5;
    let out = Experiment::Motion(params)
        .run(&img, &Transform2D::default())
        .unwrap();
    let range = out.report.motion.as_ref().unwrap().output_range;
    assert!((range[0] - 40.0).abs() < 1e-9 && (range[1] - 40.0).abs() < 1e-9, "{range:?}");
}
