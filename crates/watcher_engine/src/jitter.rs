use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

/// Source of the random offset added to each poll interval.
pub trait Jitter: Send {
    fn offset_ms(&mut self) -> f64;
}

/// Zero-mean normal jitter. A negative standard deviation counts by its
/// magnitude; zero or a non-finite value disables jitter entirely.
pub struct GaussianJitter {
    normal: Option<Normal>,
    rng: StdRng,
}

impl GaussianJitter {
    pub fn new(std_dev_ms: f64) -> Self {
        Self::with_rng(std_dev_ms, StdRng::from_entropy())
    }

    /// Deterministic jitter for reproducible runs.
    pub fn seeded(std_dev_ms: f64, seed: u64) -> Self {
        Self::with_rng(std_dev_ms, StdRng::seed_from_u64(seed))
    }

    fn with_rng(std_dev_ms: f64, rng: StdRng) -> Self {
        let normal = if std_dev_ms.is_finite() && std_dev_ms != 0.0 {
            Normal::new(0.0, std_dev_ms.abs()).ok()
        } else {
            None
        };
        Self { normal, rng }
    }
}

impl Jitter for GaussianJitter {
    fn offset_ms(&mut self) -> f64 {
        match &self.normal {
            Some(normal) => normal.sample(&mut self.rng),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watcher_core::{wait_time_ms, MIN_WAIT_MS};

    #[test]
    fn zero_std_means_no_offset() {
        let mut jitter = GaussianJitter::seeded(0.0, 7);
        assert_eq!(jitter.offset_ms(), 0.0);
        let mut jitter = GaussianJitter::seeded(f64::NAN, 7);
        assert_eq!(jitter.offset_ms(), 0.0);
    }

    #[test]
    fn negative_std_uses_its_magnitude() {
        let mut negative = GaussianJitter::seeded(-300.0, 11);
        let mut positive = GaussianJitter::seeded(300.0, 11);
        for _ in 0..10 {
            let offset = negative.offset_ms();
            assert_ne!(offset, 0.0);
            assert_eq!(offset, positive.offset_ms());
        }
    }

    #[test]
    fn samples_center_on_zero() {
        let mut jitter = GaussianJitter::seeded(500.0, 42);
        let n = 5_000;
        let mean = (0..n).map(|_| jitter.offset_ms()).sum::<f64>() / n as f64;
        assert!(mean.abs() < 50.0, "mean drifted to {mean}");
    }

    #[test]
    fn huge_jitter_never_breaks_the_floor() {
        let mut jitter = GaussianJitter::seeded(1_000_000.0, 3);
        for _ in 0..1_000 {
            assert!(wait_time_ms(100, jitter.offset_ms()) >= MIN_WAIT_MS);
        }
    }
}
