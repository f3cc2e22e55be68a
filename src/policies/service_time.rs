//! # Service-time policy for simulated deliveries.
//!
//! [`ServiceTime`] draws a delivery duration uniformly from `[min, max]`
//! (millisecond resolution).
//!
//! - **Unseeded** (`seed = None`): every draw uses the thread-local RNG.
//! - **Seeded** (`seed = Some(s)`): the draw for a parcel is a pure function of
//!   `(s, parcel label)`, so a run with the same seed and parcel list produces the
//!   same parcel → duration mapping no matter which worker picks which parcel.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use parcelvisor::{Parcel, ServiceTime};
//!
//! let st = ServiceTime::new(Duration::from_secs(2), Duration::from_secs(6)).with_seed(7);
//! let parcel = Parcel::new("Watch");
//!
//! let d = st.sample(&parcel);
//! assert!(d >= Duration::from_secs(2) && d <= Duration::from_secs(6));
//! assert_eq!(d, st.sample(&parcel));
//! ```

use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{error::ConfigError, parcel::Parcel};

/// Uniform delivery-time range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceTime {
    /// Shortest delivery.
    pub min: Duration,
    /// Longest delivery (inclusive).
    pub max: Duration,
    /// Optional seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ServiceTime {
    /// `2s..=6s`, unseeded.
    fn default() -> Self {
        Self {
            min: Duration::from_secs(2),
            max: Duration::from_secs(6),
            seed: None,
        }
    }
}

impl ServiceTime {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max,
            seed: None,
        }
    }

    /// Constant service time.
    pub fn fixed(d: Duration) -> Self {
        Self::new(d, d)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects an inverted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidServiceTime {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Draws the delivery duration for `parcel`.
    ///
    /// An inverted range collapses to `min`.
    pub fn sample(&self, parcel: &Parcel) -> Duration {
        let lo = self.min.as_millis().min(u128::from(u64::MAX)) as u64;
        let hi = self.max.as_millis().min(u128::from(u64::MAX)) as u64;
        if hi <= lo {
            return self.min;
        }

        let ms = match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ label_hash(parcel.label()));
                rng.random_range(lo..=hi)
            }
            None => rand::rng().random_range(lo..=hi),
        };
        Duration::from_millis(ms)
    }
}

/// FNV-1a; stable across processes and toolchains.
fn label_hash(label: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    label
        .bytes()
        .fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_within_bounds() {
        let st = ServiceTime::default();
        let p = Parcel::new("Laptop");
        for _ in 0..200 {
            let d = st.sample(&p);
            assert!(d >= Duration::from_secs(2), "{d:?} below min");
            assert!(d <= Duration::from_secs(6), "{d:?} above max");
        }
    }

    #[test]
    fn seeded_samples_depend_only_on_seed_and_label() {
        let a = ServiceTime::default().with_seed(42);
        let b = ServiceTime::default().with_seed(42);
        for label in ["Laptop", "Mobile", "Shoes", "Book", "Camera", "Watch"] {
            let p = Parcel::new(label);
            assert_eq!(a.sample(&p), b.sample(&p));
        }
    }

    #[test]
    fn different_labels_spread_out() {
        let st = ServiceTime::new(Duration::ZERO, Duration::from_secs(100)).with_seed(1);
        let samples: std::collections::HashSet<Duration> = (0..20)
            .map(|i| st.sample(&Parcel::new(format!("p{i}"))))
            .collect();
        assert!(samples.len() > 1);
    }

    #[test]
    fn fixed_range_is_constant() {
        let st = ServiceTime::fixed(Duration::from_millis(1500));
        assert_eq!(st.sample(&Parcel::new("x")), Duration::from_millis(1500));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let st = ServiceTime::new(Duration::from_secs(5), Duration::from_secs(1));
        assert_eq!(
            st.validate(),
            Err(ConfigError::InvalidServiceTime {
                min: Duration::from_secs(5),
                max: Duration::from_secs(1),
            })
        );
        assert_eq!(st.sample(&Parcel::new("x")), Duration::from_secs(5));
    }
}
