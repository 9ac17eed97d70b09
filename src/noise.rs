//! Additive and impulse noise for exercising the filters.
//!
//! Every generator takes the random source explicitly; seed it with
//! `StdRng::seed_from_u64` for reproducible runs.
use crate::error::{Result, SpectrumError};
use crate::image::ImageF64;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Noise settings as read from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Percentage of pixels (0–100) replaced by 0 or 255.
    pub salt_and_pepper_percent: f64,
    /// Mean of the Gaussian term, pixel units.
    pub gaussian_mean: f64,
    /// Standard deviation of the Gaussian term; 0 disables it.
    pub gaussian_sigma: f64,
    pub seed: u64,
}

impl NoiseParams {
    pub fn is_enabled(&self) -> bool {
        self.salt_and_pepper_percent > 0.0 || self.gaussian_sigma > 0.0
    }

    /// Apply the configured noise terms in place.
    pub fn apply<R: Rng + ?Sized>(&self, image: &mut ImageF64, rng: &mut R) -> Result<()> {
        if self.salt_and_pepper_percent > 0.0 {
            salt_and_pepper(image, self.salt_and_pepper_percent, rng)?;
        }
        if self.gaussian_sigma > 0.0 {
            gaussian(image, self.gaussian_mean, self.gaussian_sigma, rng)?;
        }
        Ok(())
    }
}

/// Replace about `percent`% of pixels with black (0) or white (255).
pub fn salt_and_pepper<R: Rng + ?Sized>(
    image: &mut ImageF64,
    percent: f64,
    rng: &mut R,
) -> Result<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(SpectrumError::invalid(
            "salt_and_pepper_percent",
            format!("{percent} is outside [0, 100]"),
        ));
    }
    let p = percent / 100.0;
    for v in &mut image.data {
        if rng.gen::<f64>() < p {
            *v = if rng.gen::<bool>() { 255.0 } else { 0.0 };
        }
    }
    Ok(())
}

/// Add `N(mean, sigma²)` to every pixel.
pub fn gaussian<R: Rng + ?Sized>(
    image: &mut ImageF64,
    mean: f64,
    sigma: f64,
    rng: &mut R,
) -> Result<()> {
    if !(sigma.is_finite() && sigma >= 0.0) {
        return Err(SpectrumError::invalid(
            "gaussian_sigma",
            format!("{sigma} must be finite and non-negative"),
        ));
    }
    let dist = Normal::new(mean, sigma)
        .map_err(|e| SpectrumError::invalid("gaussian_sigma", e.to_string()))?;
    for v in &mut image.data {
        *v += dist.sample(rng);
    }
    Ok(())
}
