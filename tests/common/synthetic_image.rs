use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spectral_image::image::ImageF64;
use spectral_image::ComplexBuffer;
use std::f64::consts::PI;

/// Uniform random samples in `[-1, 1)` for both parts, reproducible per seed.
pub fn random_buffer(rows: usize, cols: usize, seed: u64) -> ComplexBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    ComplexBuffer::from_fn(rows, cols, |_, _| {
        Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    })
}

/// Random real image in pixel units.
pub fn random_image(w: usize, h: usize, seed: u64) -> ImageF64 {
    let mut rng = StdRng::seed_from_u64(seed);
    ImageF64::from_fn(w, h, |_, _| rng.gen_range(0.0..255.0))
}

/// Flat grey background with a brighter `side × side` square at the centre.
pub fn square_on_grey(size: usize, side: usize, base: f64, square: f64) -> ImageF64 {
    let lo = (size - side) / 2;
    ImageF64::from_fn(size, size, |x, y| {
        if (lo..lo + side).contains(&x) && (lo..lo + side).contains(&y) {
            base + square
        } else {
            base
        }
    })
}

/// Diagonal interference `amplitude · sin(2π (x + y) / period)`.
pub fn add_diagonal_interference(image: &mut ImageF64, period: f64, amplitude: f64) {
    for y in 0..image.h {
        for x in 0..image.w {
            let v = image.get(x, y) + amplitude * (2.0 * PI * (x + y) as f64 / period).sin();
            image.set(x, y, v);
        }
    }
}

pub fn max_abs_diff(a: &ImageF64, b: &ImageF64) -> f64 {
    assert_eq!((a.w, a.h), (b.w, b.h), "image sizes differ");
    a.data
        .iter()
        .zip(&b.data)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
