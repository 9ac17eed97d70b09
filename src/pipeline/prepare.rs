//! Optional input preparation ahead of an experiment: affine resampling,
//! synthetic noise and median pre-filtering, applied in that order.
use crate::affine::AffineParams;
use crate::diagnostics::TimingBreakdown;
use crate::error::Result;
use crate::image::ImageF64;
use crate::noise::NoiseParams;
use crate::spatial;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preprocess {
    pub affine: Option<AffineParams>,
    pub noise: Option<NoiseParams>,
    /// Odd window size of a median filter run after noise injection.
    pub median: Option<usize>,
}

impl Preprocess {
    pub fn is_identity(&self) -> bool {
        self.affine.is_none()
            && self.noise.map_or(true, |n| !n.is_enabled())
            && self.median.is_none()
    }

    /// Produce the experiment input. Noise is seeded from its own
    /// parameters so identical configurations give identical images.
    pub fn apply(&self, image: &ImageF64, timings: &mut TimingBreakdown) -> Result<ImageF64> {
        let mut img = match &self.affine {
            Some(affine) => timings.measure("affine", || affine.apply(image))?,
            None => image.clone(),
        };
        if let Some(noise) = self.noise.filter(NoiseParams::is_enabled) {
            debug!("prepare: noise {noise:?}");
            let mut rng = StdRng::seed_from_u64(noise.seed);
            timings.measure("noise", || noise.apply(&mut img, &mut rng))?;
        }
        if let Some(size) = self.median {
            img = timings.measure("median", || spatial::median(&img, size))?;
        }
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_passthrough() {
        let img = ImageF64::from_fn(5, 5, |x, y| (x + y) as f64);
        let prep = Preprocess::default();
        assert!(prep.is_identity());
        let mut t = TimingBreakdown::default();
        assert_eq!(prep.apply(&img, &mut t).unwrap(), img);
        assert!(t.stages.is_empty());
    }

    #[test]
    fn median_cleans_salt_and_pepper() {
        let img = ImageF64::from_fn(16, 16, |_, _| 128.0);
        let prep = Preprocess {
            affine: None,
            noise: Some(NoiseParams {
                salt_and_pepper_percent: 5.0,
                seed: 3,
                ..Default::default()
            }),
            median: Some(3),
        };
        let mut t = TimingBreakdown::default();
        let out = prep.apply(&img, &mut t).unwrap();
        let untouched = out.data.iter().filter(|&&v| v == 128.0).count();
        assert!(untouched > 240, "untouched={untouched}");
        assert_eq!(t.stages.len(), 2);
    }
}
