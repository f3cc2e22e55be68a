//! # Run configuration.
//!
//! [`Config`] centralizes the knobs of one simulation run: pool size, time
//! budget, idle timeout, service-time range, event bus capacity and OS signal
//! handling.
//!
//! Values can be overridden from the environment with [`Config::from_env`]:
//!
//! | Variable                      | Field                  | Unit    |
//! |-------------------------------|------------------------|---------|
//! | `PARCELVISOR_WORKERS`         | `workers`              | count   |
//! | `PARCELVISOR_BUDGET_SECS`     | `budget`               | seconds |
//! | `PARCELVISOR_IDLE_SECS`       | `idle_timeout`         | seconds |
//! | `PARCELVISOR_SERVICE_MIN_MS`  | `service_time.min`     | ms      |
//! | `PARCELVISOR_SERVICE_MAX_MS`  | `service_time.max`     | ms      |
//! | `PARCELVISOR_SEED`            | `service_time.seed`    | u64     |
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use parcelvisor::Config;
//!
//! let mut cfg = Config::default();
//! cfg.workers = 4;
//! cfg.budget = Duration::from_secs(5);
//!
//! assert!(cfg.validate().is_ok());
//! ```

use std::str::FromStr;
use std::time::Duration;

use crate::{error::ConfigError, policies::ServiceTime};

/// Configuration for one run of the simulation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of workers spawned (fixed for the whole run, must be ≥ 1).
    pub workers: usize,

    /// Global time budget; the deadline is `start + budget`.
    ///
    /// The manager always waits the full budget unless interrupted.
    pub budget: Duration,

    /// How long a worker waits on an empty queue before leaving voluntarily.
    pub idle_timeout: Duration,

    /// Delivery-time range used by the default courier.
    pub service_time: ServiceTime,

    /// Capacity of the event bus ring buffer (min 1; clamped by Bus).
    pub bus_capacity: usize,

    /// End the deadline wait early on SIGINT/SIGTERM/SIGQUIT (Ctrl-C elsewhere).
    pub handle_signals: bool,
}

impl Default for Config {
    /// - `workers = 3`
    /// - `budget = 10s`
    /// - `idle_timeout = 3s`
    /// - `service_time = 2s..=6s`, unseeded
    /// - `bus_capacity = 1024`
    /// - `handle_signals = true`
    fn default() -> Self {
        Self {
            workers: 3,
            budget: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(3),
            service_time: ServiceTime::default(),
            bus_capacity: 1024,
            handle_signals: true,
        }
    }
}

impl Config {
    /// Checks everything a run needs before spawning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        self.service_time.validate()
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Defaults overridden by `PARCELVISOR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(n) = parse::<usize>(&lookup, "PARCELVISOR_WORKERS")? {
            cfg.workers = n;
        }
        if let Some(s) = parse::<u64>(&lookup, "PARCELVISOR_BUDGET_SECS")? {
            cfg.budget = Duration::from_secs(s);
        }
        if let Some(s) = parse::<u64>(&lookup, "PARCELVISOR_IDLE_SECS")? {
            cfg.idle_timeout = Duration::from_secs(s);
        }
        if let Some(ms) = parse::<u64>(&lookup, "PARCELVISOR_SERVICE_MIN_MS")? {
            cfg.service_time.min = Duration::from_millis(ms);
        }
        if let Some(ms) = parse::<u64>(&lookup, "PARCELVISOR_SERVICE_MAX_MS")? {
            cfg.service_time.max = Duration::from_millis(ms);
        }
        if let Some(seed) = parse::<u64>(&lookup, "PARCELVISOR_SEED")? {
            cfg.service_time.seed = Some(seed);
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Parse { key, value: raw }),
    }
}
