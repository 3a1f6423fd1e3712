//! Simulated fix provider for hardware-free runs
//!
//! Generates a seeded random walk starting from a configured point, one
//! fix per interval with Gaussian step jitter. Seed 0 draws fresh entropy
//! each run.

use super::FixProvider;
use crate::config::SimulationConfig;
use crate::core::types::GeoPoint;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::time::Duration;

/// Random-walk fix generator
pub struct SimulatedProvider {
    position: GeoPoint,
    interval: Duration,
    rng: StdRng,
    step: Option<Normal<f64>>,
}

impl SimulatedProvider {
    /// Create a provider from simulation configuration
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = if config.random_seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(config.random_seed)
        };

        Self {
            position: GeoPoint::new(config.start_latitude, config.start_longitude),
            interval: Duration::from_millis(config.fix_interval_ms),
            rng,
            step: Normal::new(0.0, config.step_sigma_deg).ok(),
        }
    }

    fn advance(&mut self) -> GeoPoint {
        if let Some(step) = self.step {
            self.position.latitude += step.sample(&mut self.rng);
            self.position.longitude += step.sample(&mut self.rng);
        }
        self.position
    }
}

impl FixProvider for SimulatedProvider {
    fn last_known(&mut self) -> Result<Option<GeoPoint>> {
        Ok(Some(self.position))
    }

    fn recv_fix(&mut self, timeout: Duration) -> Result<Option<GeoPoint>> {
        if timeout < self.interval {
            std::thread::sleep(timeout);
            return Ok(None);
        }
        std::thread::sleep(self.interval);
        Ok(Some(self.advance()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn sim_config() -> SimulationConfig {
        let mut config = AppConfig::demo_defaults().simulation;
        config.fix_interval_ms = 1;
        config
    }

    #[test]
    fn test_last_known_is_start_point() {
        let config = sim_config();
        let mut provider = SimulatedProvider::new(&config);
        let fix = provider.last_known().unwrap().unwrap();
        assert_eq!(fix.latitude, config.start_latitude);
        assert_eq!(fix.longitude, config.start_longitude);
    }

    #[test]
    fn test_walk_advances_each_fix() {
        let mut provider = SimulatedProvider::new(&sim_config());
        let first = provider
            .recv_fix(Duration::from_millis(50))
            .unwrap()
            .unwrap();
        let second = provider
            .recv_fix(Duration::from_millis(50))
            .unwrap()
            .unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let config = sim_config();
        let mut a = SimulatedProvider::new(&config);
        let mut b = SimulatedProvider::new(&config);
        let fix_a = a.recv_fix(Duration::from_millis(50)).unwrap().unwrap();
        let fix_b = b.recv_fix(Duration::from_millis(50)).unwrap().unwrap();
        assert_eq!(fix_a, fix_b);
    }

    #[test]
    fn test_short_timeout_returns_none() {
        let mut config = sim_config();
        config.fix_interval_ms = 10_000;
        let mut provider = SimulatedProvider::new(&config);
        let fix = provider.recv_fix(Duration::from_millis(1)).unwrap();
        assert!(fix.is_none());
    }
}
