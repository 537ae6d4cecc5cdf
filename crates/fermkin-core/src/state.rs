//! Reactor state and trajectory snapshots.

use serde::{Deserialize, Serialize};

/// Instantaneous state of the fermentation broth.
///
/// Concentrations are g/L; the volume unit (L or mL) is the caller's
/// choice and must be used consistently for the initial state and the
/// feed rate. The state is owned exclusively by the simulation driver
/// for the duration of a run and mutated once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FermentationState {
    /// Biomass concentration X
    pub biomass: f64,
    /// Product (lactic acid) concentration P
    pub product: f64,
    /// Substrate (lactose) concentration S
    pub substrate: f64,
    /// Culture volume V
    pub volume: f64,
}

impl FermentationState {
    /// Create a state from initial values.
    pub fn new(biomass: f64, product: f64, substrate: f64, volume: f64) -> Self {
        Self { biomass, product, substrate, volume }
    }

    /// True when all concentrations are non-negative, the volume is
    /// strictly positive and every field is finite.
    pub fn is_physical(&self) -> bool {
        self.biomass >= 0.0
            && self.product >= 0.0
            && self.substrate >= 0.0
            && self.volume > 0.0
            && [self.biomass, self.product, self.substrate, self.volume]
                .iter()
                .all(|v| v.is_finite())
    }
}

/// One snapshot of a simulation run.
///
/// Field order matches the CSV column order expected by downstream
/// consumers: time, biomass, product, substrate, volume, temperature, pH.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Simulation time (tick index × dt)
    pub time: f64,
    /// Biomass concentration X
    pub biomass: f64,
    /// Lactic acid concentration P
    pub product: f64,
    /// Lactose concentration S
    pub substrate: f64,
    /// Culture volume V
    pub volume: f64,
    /// Broth temperature for this tick (K)
    pub temperature: f64,
    /// Estimated pH
    pub ph: f64,
}

/// Ordered, append-only sequence of snapshots produced by a run.
pub type Trajectory = Vec<TrajectorySample>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_state() {
        let state = FermentationState::new(0.137, 0.024, 41.246, 500.0);
        assert!(state.is_physical());
    }

    #[test]
    fn test_unphysical_states() {
        let negative = FermentationState::new(-0.1, 0.0, 0.0, 1.0);
        assert!(!negative.is_physical());

        let empty_vessel = FermentationState::new(0.1, 0.0, 0.0, 0.0);
        assert!(!empty_vessel.is_physical());

        let nan = FermentationState::new(f64::NAN, 0.0, 0.0, 1.0);
        assert!(!nan.is_physical());
    }
}
