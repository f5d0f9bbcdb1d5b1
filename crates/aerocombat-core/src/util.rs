//! Angle conversions and a stateless gaussian-noise sampler.
//!
//! All user-facing angles (geodetic coordinates, Euler angles) are in
//! degrees; the integrator and PID work in radians internally. Conversions
//! happen only at call sites that cross this boundary.

use rand::Rng;
use rand_distr::{Distribution, Normal};

pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// A standard-normal sample scaled to `(mean, std_dev)`, drawn from the given
/// RNG. No sensor-noise model in the tick-critical core calls this; it is a
/// utility for hosts layering their own noise over a clean snapshot. Unlike
/// the source's `gaussrand`, no state survives between calls.
pub fn gaussian_noise(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let normal = Normal::new(mean, std_dev).expect("std_dev must be finite and non-negative");
    normal.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn deg_rad_round_trip() {
        for deg in [-720.0, -90.0, 0.0, 45.0, 359.9, 400.0] {
            let back = rad_to_deg(deg_to_rad(deg));
            assert!((back - deg).abs() < 1e-12, "deg={deg} back={back}");
        }
    }

    #[test]
    fn gaussian_noise_is_deterministic_for_a_seeded_rng() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let sample_a = gaussian_noise(&mut a, 0.0, 1.0);
        let sample_b = gaussian_noise(&mut b, 0.0, 1.0);
        assert_eq!(sample_a, sample_b);
    }

    #[test]
    fn gaussian_noise_centres_on_mean_over_many_samples() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 20_000;
        let sum: f64 = (0..n).map(|_| gaussian_noise(&mut rng, 5.0, 2.0)).sum();
        let mean = sum / n as f64;
        assert!((mean - 5.0).abs() < 0.1, "sample mean {mean} drifted from 5.0");
    }
}
