//! Arrhenius rate model.
//!
//! Converts the reference rate constants into effective maximum specific
//! rates at the current broth temperature:
//!
//! ```text
//! k(T) = k_ref · exp(-(Ea/R) · (1/T − 1/T_ref))
//! ```
//!
//! The correction is relative to a fixed reference temperature, so at
//! T = 298.15 K every effective rate equals its reference value exactly.

use fermkin_core::{FermError, Result};

use crate::params::KineticParams;

/// Universal gas constant R (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314;

/// Reference temperature for the Arrhenius correction (K)
pub const REFERENCE_TEMP_K: f64 = 298.15;

/// Lower bound applied to every effective rate.
///
/// This is a numerical-stability policy, not a physical law: a rate that
/// underflows toward zero stalls the kinetics and invites divide-by-zero
/// in downstream ratio terms, so computed rates are floored here.
pub const RATE_FLOOR: f64 = 1e-6;

/// Temperature-corrected maximum specific rates for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRates {
    /// Maximum specific growth rate μ_max
    pub mu_max: f64,
    /// Maximum specific product formation rate qp_max
    pub qp_max: f64,
    /// Maximum specific substrate consumption rate qs_max
    pub qs_max: f64,
}

/// Compute the effective rates at `temperature` (K).
///
/// Pure function of its inputs. Fails with
/// [`FermError::InvalidTemperature`] when the temperature is at or below
/// absolute zero.
pub fn effective_rates(params: &KineticParams, temperature: f64) -> Result<EffectiveRates> {
    if temperature <= 0.0 {
        return Err(FermError::invalid_temperature(temperature));
    }

    Ok(EffectiveRates {
        mu_max: arrhenius(params.mu_ref, params.ea_mu, temperature),
        qp_max: arrhenius(params.qp_ref, params.ea_qp, temperature),
        qs_max: arrhenius(params.qs_ref, params.ea_qs, temperature),
    })
}

fn arrhenius(reference: f64, activation_energy: f64, temperature: f64) -> f64 {
    let corrected = reference
        * (-(activation_energy / GAS_CONSTANT) * (1.0 / temperature - 1.0 / REFERENCE_TEMP_K))
            .exp();
    corrected.max(RATE_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_temperature_is_identity() {
        // The exponent vanishes at T_ref, so rates above the floor pass
        // through exactly.
        let params = KineticParams {
            mu_ref: 0.4,
            qp_ref: 0.12,
            qs_ref: 0.35,
            ..Default::default()
        };
        let rates = effective_rates(&params, REFERENCE_TEMP_K).unwrap();
        assert_eq!(rates.mu_max, 0.4);
        assert_eq!(rates.qp_max, 0.12);
        assert_eq!(rates.qs_max, 0.35);
    }

    #[test]
    fn test_rate_increases_with_temperature() {
        let params = KineticParams { mu_ref: 0.4, ..Default::default() };
        let cold = effective_rates(&params, 290.0).unwrap();
        let warm = effective_rates(&params, 310.0).unwrap();
        assert!(warm.mu_max > cold.mu_max);
        assert!(cold.mu_max < 0.4 && 0.4 < warm.mu_max);
    }

    #[test]
    fn test_floor_holds_for_vanishing_rates() {
        // Zero reference rates and a negative activation energy that
        // drives the exponential toward zero still produce the floor.
        let params = KineticParams {
            mu_ref: 0.0,
            qp_ref: 0.0,
            qs_ref: 1e-12,
            ea_qs: -500_000.0,
            ..Default::default()
        };
        let rates = effective_rates(&params, 350.0).unwrap();
        assert_eq!(rates.mu_max, RATE_FLOOR);
        assert_eq!(rates.qp_max, RATE_FLOOR);
        assert_eq!(rates.qs_max, RATE_FLOOR);
    }

    #[test]
    fn test_invalid_temperature() {
        let params = KineticParams::default();
        for t in [0.0, -1.0, -273.15] {
            match effective_rates(&params, t) {
                Err(FermError::InvalidTemperature { kelvin }) => assert_eq!(kelvin, t),
                other => panic!("expected InvalidTemperature, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_arrhenius_shape() {
        // Doubling Ea doubles the log-scale correction
        let k1 = arrhenius(1.0, 50_000.0, 310.0);
        let k2 = arrhenius(1.0, 100_000.0, 310.0);
        assert_relative_eq!(k1.ln() * 2.0, k2.ln(), epsilon = 1e-12);
    }
}
