//! Temperature schedules.
//!
//! A [`TemperatureProfile`] is the externally supplied sequence of broth
//! temperatures, one sample per simulated tick. The core reads it and
//! never mutates it; all samples are Kelvin and must be strictly
//! positive.

use serde::{Deserialize, Serialize};

use crate::errors::{FermError, Result};

/// Ordered sequence of temperature samples (K), one per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureProfile(Vec<f64>);

impl TemperatureProfile {
    /// Wrap raw samples.
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self(samples)
    }

    /// Constant temperature for `len` ticks.
    pub fn constant(kelvin: f64, len: usize) -> Self {
        Self(vec![kelvin; len])
    }

    /// Sinusoidal schedule `base + amplitude·sin(2πi/len)` for `len`
    /// ticks, the shape used by the reference data-generation study.
    pub fn sinusoidal(base: f64, amplitude: f64, len: usize) -> Self {
        let samples = (0..len)
            .map(|i| {
                base + amplitude * (2.0 * std::f64::consts::PI * i as f64 / len as f64).sin()
            })
            .collect();
        Self(samples)
    }

    /// Temperature at `tick`, if the profile extends that far.
    pub fn sample(&self, tick: usize) -> Option<f64> {
        self.0.get(tick).copied()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the profile holds no samples.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw samples, in tick order.
    pub fn samples(&self) -> &[f64] {
        &self.0
    }

    /// Reject profiles containing non-positive temperatures.
    ///
    /// The driver also fails tick-by-tick, but validating up front gives
    /// callers a diagnostic before a long run starts.
    pub fn validate(&self) -> Result<()> {
        match self.0.iter().find(|t| **t <= 0.0) {
            Some(&kelvin) => Err(FermError::invalid_temperature(kelvin)),
            None => Ok(()),
        }
    }
}
