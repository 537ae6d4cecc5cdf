//! Kinetic parameter record.
//!
//! A fixed, validated configuration struct with named fields and
//! explicit defaults. Parameters are checked once when the simulator
//! is built, never looked up per tick.

use serde::{Deserialize, Serialize};

use fermkin_core::{FermError, Result};

/// Per-run kinetic configuration. Immutable for the duration of a run.
///
/// Reference rates are the maximum specific rates at 298.15 K;
/// activation energies are J/mol. Concentrations are g/L and the volume
/// unit is the caller's (consistent with the initial state and
/// `feed_rate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticParams {
    /// Reference maximum specific growth rate μ_ref (1/time)
    #[serde(default = "default_mu_ref", alias = "muRef")]
    pub mu_ref: f64,
    /// Reference specific product formation rate qp_ref (1/time)
    #[serde(default = "default_qp_ref", alias = "qpRef")]
    pub qp_ref: f64,
    /// Reference specific substrate consumption rate qs_ref (1/time)
    #[serde(default = "default_qs_ref", alias = "qsRef")]
    pub qs_ref: f64,

    /// Activation energy for growth (J/mol)
    #[serde(default = "default_ea_mu", alias = "EaMu")]
    pub ea_mu: f64,
    /// Activation energy for product formation (J/mol)
    #[serde(default = "default_ea_qp", alias = "EaQp")]
    pub ea_qp: f64,
    /// Activation energy for substrate consumption (J/mol)
    #[serde(default = "default_ea_qs", alias = "EaQs")]
    pub ea_qs: f64,

    /// Substrate half-saturation / inhibition constant Kis (g/L)
    #[serde(default = "default_kis", alias = "Kis")]
    pub kis: f64,
    /// Product concentration where growth inhibition begins, Pix (g/L)
    #[serde(default = "default_pix", alias = "Pix")]
    pub pix: f64,
    /// Product concentration that fully arrests growth, Pmx (g/L)
    #[serde(default = "default_pmx", alias = "Pmx")]
    pub pmx: f64,

    /// Product-inhibition coupling coefficient. Scales both the
    /// growth-coupled formation term and its dilution correction; 1.0
    /// reproduces the uncoupled model.
    #[serde(default = "default_inhib", alias = "Inhib")]
    pub inhib: f64,
    /// Secondary inhibition constant. Accepted for scenario-file
    /// compatibility with the reference parameter set; not applied by
    /// the rate laws.
    #[serde(default, alias = "Ksp")]
    pub ksp: Option<f64>,

    /// Feed rate F (volume-units/time); 0 for pure batch operation
    #[serde(default, alias = "F")]
    pub feed_rate: f64,
    /// Integration step dt (time units)
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Upper bound on the feed rate; F must satisfy 0 ≤ F < max_feed_rate
    #[serde(default = "default_max_feed_rate")]
    pub max_feed_rate: f64,
    /// Volume cap modelling a closed vessel: dV is held at 0 once V
    /// reaches this value. None disables the cap.
    #[serde(default)]
    pub volume_cap: Option<f64>,
    /// Ceiling on each derivative's magnitude, a stability guard against
    /// misconfigured parameters producing exploding steps. None disables
    /// the clamp.
    #[serde(default = "default_derivative_limit")]
    pub derivative_limit: Option<f64>,

    /// Conjugate-base pool available to resist pH change (g/L)
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: f64,
}

impl Default for KineticParams {
    fn default() -> Self {
        Self {
            mu_ref: default_mu_ref(),
            qp_ref: default_qp_ref(),
            qs_ref: default_qs_ref(),
            ea_mu: default_ea_mu(),
            ea_qp: default_ea_qp(),
            ea_qs: default_ea_qs(),
            kis: default_kis(),
            pix: default_pix(),
            pmx: default_pmx(),
            inhib: default_inhib(),
            ksp: None,
            feed_rate: 0.0,
            dt: default_dt(),
            max_feed_rate: default_max_feed_rate(),
            volume_cap: None,
            derivative_limit: default_derivative_limit(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl KineticParams {
    /// Parameter set of the reference data-generation study
    /// (lactose → lactic acid, fed-batch, mL volume scale).
    pub fn reference() -> Self {
        Self {
            mu_ref: 1.54e-10,
            qp_ref: 3.75e-5,
            qs_ref: 2.10e-4,
            ea_mu: 50_000.0,
            ea_qp: 40_000.0,
            ea_qs: 45_000.0,
            kis: 5.41e5,
            pix: 4.8,
            pmx: 5.0,
            inhib: 1.33,
            ksp: Some(-27.50),
            feed_rate: 0.2778,
            dt: 1.0,
            ..Default::default()
        }
    }

    /// Validate configuration consistency.
    ///
    /// Called once at simulator construction so that per-tick stepping
    /// never trips over a malformed record.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("mu_ref", self.mu_ref),
            ("qp_ref", self.qp_ref),
            ("qs_ref", self.qs_ref),
            ("ea_mu", self.ea_mu),
            ("ea_qp", self.ea_qp),
            ("ea_qs", self.ea_qs),
            ("kis", self.kis),
            ("pix", self.pix),
            ("pmx", self.pmx),
            ("inhib", self.inhib),
            ("feed_rate", self.feed_rate),
            ("dt", self.dt),
            ("max_feed_rate", self.max_feed_rate),
            ("buffer_capacity", self.buffer_capacity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(FermError::config(format!("{name} must be finite (got {value})")));
            }
        }

        if self.dt <= 0.0 {
            return Err(FermError::config(format!("dt must be > 0 (got {})", self.dt)));
        }

        if (self.pmx - self.pix).abs() < crate::stepper::INHIBITION_EPSILON {
            return Err(FermError::degenerate_inhibition(self.pix, self.pmx));
        }

        if self.feed_rate < 0.0 || self.feed_rate >= self.max_feed_rate {
            return Err(FermError::flow_rate(self.feed_rate, self.max_feed_rate));
        }

        if let Some(cap) = self.volume_cap {
            if cap <= 0.0 {
                return Err(FermError::config(format!("volume_cap must be > 0 (got {cap})")));
            }
        }
        if let Some(limit) = self.derivative_limit {
            if limit <= 0.0 {
                return Err(FermError::config(format!(
                    "derivative_limit must be > 0 (got {limit})"
                )));
            }
        }

        Ok(())
    }
}

fn default_mu_ref() -> f64 {
    1.54e-10
}
fn default_qp_ref() -> f64 {
    3.75e-5
}
fn default_qs_ref() -> f64 {
    2.10e-4
}
fn default_ea_mu() -> f64 {
    50_000.0
}
fn default_ea_qp() -> f64 {
    40_000.0
}
fn default_ea_qs() -> f64 {
    45_000.0
}
fn default_kis() -> f64 {
    5.41e5
}
fn default_pix() -> f64 {
    4.8
}
fn default_pmx() -> f64 {
    5.0
}
fn default_inhib() -> f64 {
    1.0
}
fn default_dt() -> f64 {
    1.0
}
fn default_max_feed_rate() -> f64 {
    2.0
}
fn default_derivative_limit() -> Option<f64> {
    Some(1e6)
}
fn default_buffer_capacity() -> f64 {
    0.1
}
