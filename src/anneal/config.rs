//! Annealer configuration.

use crate::error::{Result, TspError};

use super::guess::AnnealSettings;

/// Configuration for one [`Annealer`](super::Annealer) job.
///
/// Cooling is geometric: the temperature is multiplied by `temp_cool`
/// once per step. `total_steps` bounds a single job; warm restarts start
/// a new job of the same length without resetting the temperature.
///
/// # Examples
///
/// ```
/// use tsp_anneal::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_total_steps(50_000)
///     .with_temperature(0.02)
///     .with_temp_cool(0.99999)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Steps per job.
    pub total_steps: usize,

    /// Initial temperature.
    pub temperature: f64,

    /// Multiplicative temperature decay per step.
    pub temp_cool: f64,

    /// Random seed used by [`Annealer::from_config`](super::Annealer::from_config).
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            total_steps: 10_000,
            temperature: 1.0,
            temp_cool: 0.9995,
            seed: None,
        }
    }
}

impl AnnealConfig {
    /// Temperature settings taken from guessed parameters.
    pub fn from_settings(settings: &AnnealSettings, steps_per_job: usize) -> Self {
        Self::default()
            .with_total_steps(steps_per_job)
            .with_temperature(settings.temperature)
            .with_temp_cool(settings.temp_cool)
    }

    pub fn with_total_steps(mut self, n: usize) -> Self {
        self.total_steps = n;
        self
    }

    pub fn with_temperature(mut self, t: f64) -> Self {
        self.temperature = t;
        self
    }

    pub fn with_temp_cool(mut self, factor: f64) -> Self {
        self.temp_cool = factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.total_steps == 0 {
            return Err(TspError::InvalidConfig(
                "total_steps must be positive".into(),
            ));
        }
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(TspError::InvalidConfig(format!(
                "temperature must be positive and finite, got {}",
                self.temperature
            )));
        }
        if !(self.temp_cool.is_finite() && self.temp_cool > 0.0) {
            return Err(TspError::InvalidConfig(format!(
                "temp_cool must be positive and finite, got {}",
                self.temp_cool
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert_eq!(config.total_steps, 10_000);
        assert!((config.temperature - 1.0).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_steps() {
        let config = AnnealConfig::default().with_total_steps(0);
        assert!(matches!(config.validate(), Err(TspError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bad_temperature() {
        assert!(AnnealConfig::default()
            .with_temperature(-1.0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_temperature(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_cooling() {
        assert!(AnnealConfig::default().with_temp_cool(0.0).validate().is_err());
        assert!(AnnealConfig::default()
            .with_temp_cool(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_settings() {
        let settings = AnnealSettings {
            temperature: 0.3,
            temp_cool: 0.999,
            size_scale: 0.1,
            size_cool: 0.998,
            k_neighbors: 50.0,
            nbrs_cool: 0.997,
        };
        let config = AnnealConfig::from_settings(&settings, 1234);
        assert_eq!(config.total_steps, 1234);
        assert!((config.temperature - 0.3).abs() < 1e-15);
        assert!((config.temp_cool - 0.999).abs() < 1e-15);
    }
}
