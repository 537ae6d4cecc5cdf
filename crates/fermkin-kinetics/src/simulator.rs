//! Simulation driver.
//!
//! Orchestrates the per-tick pipeline (rate model → stepper → pH) across
//! an externally supplied temperature profile, accumulating a trajectory
//! and stopping on the first unrecoverable error.

use log::{info, warn};

use fermkin_core::{
    FermentationState, FermError, Result, TemperatureProfile, Trajectory, TrajectorySample,
};

use crate::params::KineticParams;
use crate::ph::{estimate_ph, Acid};
use crate::rates::effective_rates;
use crate::stepper::step;

/// Diagnostic attached to a run that stopped before completing.
#[derive(Debug)]
pub struct SimulationAbort {
    /// Tick index at which the stepper (or rate model) failed
    pub tick: usize,
    /// The specific failure
    pub error: FermError,
}

/// Outcome of a run: the accumulated trajectory, possibly partial.
#[derive(Debug)]
pub struct SimulationReport {
    /// Ordered snapshots, one per completed tick
    pub trajectory: Trajectory,
    /// Present when the run stopped early
    pub aborted: Option<SimulationAbort>,
    /// Simulated time covered (completed ticks × dt)
    pub simulated_time: f64,
}

impl SimulationReport {
    /// True when every requested tick completed.
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Batch/fed-batch fermentation simulator.
///
/// Owns the running [`FermentationState`] for the duration of a run; no
/// other component holds a reference across ticks. Deterministic:
/// identical inputs always produce an identical trajectory.
pub struct FermentationSimulator {
    params: KineticParams,
}

impl FermentationSimulator {
    /// Create a simulator, validating the parameter record once.
    pub fn new(params: KineticParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The validated parameter record.
    pub fn params(&self) -> &KineticParams {
        &self.params
    }

    /// Run `time_steps` ticks from `initial`, reading one temperature
    /// sample per tick.
    ///
    /// Fail-fast: the first error aborts the run and the report carries
    /// the partial trajectory together with the error and the tick index
    /// at which it occurred. A profile shorter than `time_steps` is a
    /// precondition violation and rejected before the first tick.
    pub fn run(
        &self,
        initial: FermentationState,
        profile: &TemperatureProfile,
        time_steps: usize,
    ) -> Result<SimulationReport> {
        if profile.len() < time_steps {
            return Err(FermError::config(format!(
                "temperature profile has {} samples but {} ticks were requested",
                profile.len(),
                time_steps
            )));
        }

        let dt = self.params.dt;
        let mut trajectory = Vec::with_capacity(time_steps);
        let mut state = initial;
        let mut aborted = None;

        for tick in 0..time_steps {
            // Profile length was checked up front
            let temperature = match profile.sample(tick) {
                Some(t) => t,
                None => break,
            };

            let outcome = effective_rates(&self.params, temperature)
                .and_then(|rates| step(&state, &rates, &self.params));

            match outcome {
                Ok(next) => state = next,
                Err(error) => {
                    warn!("run aborted at tick {tick}: {error}");
                    aborted = Some(SimulationAbort { tick, error });
                    break;
                }
            }

            let ph = estimate_ph(&[Acid::lactic(state.product)], self.params.buffer_capacity);
            trajectory.push(TrajectorySample {
                time: tick as f64 * dt,
                biomass: state.biomass,
                product: state.product,
                substrate: state.substrate,
                volume: state.volume,
                temperature,
                ph,
            });
        }

        let simulated_time = trajectory.len() as f64 * dt;
        info!(
            "simulated {}/{} ticks ({:.1} time units), final X={:.4} P={:.4} S={:.4} V={:.4}",
            trajectory.len(),
            time_steps,
            simulated_time,
            state.biomass,
            state.product,
            state.substrate,
            state.volume,
        );

        Ok(SimulationReport { trajectory, aborted, simulated_time })
    }
}
