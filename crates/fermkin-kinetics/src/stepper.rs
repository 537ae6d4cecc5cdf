//! Kinetic stepper: coupled derivatives and one explicit Euler step.
//!
//! The stepper is stateless between calls: each invocation is a pure
//! transition `(state, rates, params) -> state'`. A failed transition
//! leaves the caller's previous state untouched as the last valid
//! snapshot.
//!
//! Derivatives (all rates are concentration/time):
//!
//! ```text
//! dX = μ_max·X·(1 − (P − Pix)/(Pmx − Pix)) + F·X/V
//! dP = inhib·dX + qp_max·X·S/(Kis + S) + F·P/V − inhib·X/V
//! dS = −qs_max·X·Kis/(Kis + S) + F·S/V
//! dV = F            (held at 0 once V reaches the configured cap)
//! ```

use fermkin_core::{FermentationState, FermError, Result};

use crate::params::KineticParams;
use crate::rates::EffectiveRates;

/// Minimum |Pmx − Pix| below which the growth-inhibition denominator is
/// numerically meaningless.
pub const INHIBITION_EPSILON: f64 = 1e-6;

/// Post-integration volume floor. Keeps the next tick's F/V dilution
/// terms away from division by zero.
pub const VOLUME_FLOOR: f64 = 1e-3;

/// Advance the state by one Euler step of `params.dt`.
///
/// Validity policy, in order:
/// 1. [`FermError::DegenerateInhibition`] before any derivative math
///    when |Pmx − Pix| < [`INHIBITION_EPSILON`]
/// 2. [`FermError::FlowRateOutOfRange`] when F is negative or at/above
///    `params.max_feed_rate`
/// 3. [`FermError::NumericalInstability`] when any derivative is
///    NaN or infinite
/// 4. Silent magnitude clamp of each derivative to
///    `params.derivative_limit`
/// 5. Silent non-negativity clamps on X, P, S and the
///    [`VOLUME_FLOOR`] on V after integration
pub fn step(
    state: &FermentationState,
    rates: &EffectiveRates,
    params: &KineticParams,
) -> Result<FermentationState> {
    let inhibition_window = params.pmx - params.pix;
    if inhibition_window.abs() < INHIBITION_EPSILON {
        return Err(FermError::degenerate_inhibition(params.pix, params.pmx));
    }

    let feed = params.feed_rate;
    if feed < 0.0 || feed >= params.max_feed_rate {
        return Err(FermError::flow_rate(feed, params.max_feed_rate));
    }

    let x = state.biomass;
    let p = state.product;
    let s = state.substrate;
    let v = state.volume;

    let d_biomass = rates.mu_max * x * (1.0 - (p - params.pix) / inhibition_window) + feed * x / v;
    let d_product = params.inhib * d_biomass
        + rates.qp_max * x * s / (params.kis + s)
        + feed * p / v
        - params.inhib * x / v;
    let d_substrate = -rates.qs_max * x * params.kis / (params.kis + s) + feed * s / v;
    let d_volume = match params.volume_cap {
        Some(cap) if v >= cap => 0.0,
        _ => feed,
    };

    for (quantity, value) in [
        ("dX", d_biomass),
        ("dP", d_product),
        ("dS", d_substrate),
        ("dV", d_volume),
    ] {
        if !value.is_finite() {
            return Err(FermError::instability(quantity, value));
        }
    }

    let d_biomass = bounded(d_biomass, params.derivative_limit);
    let d_product = bounded(d_product, params.derivative_limit);
    let d_substrate = bounded(d_substrate, params.derivative_limit);
    let d_volume = bounded(d_volume, params.derivative_limit);

    let dt = params.dt;
    Ok(FermentationState {
        biomass: (x + d_biomass * dt).max(0.0),
        product: (p + d_product * dt).max(0.0),
        substrate: (s + d_substrate * dt).max(0.0),
        volume: (v + d_volume * dt).max(VOLUME_FLOOR),
    })
}

/// Clamp a derivative's magnitude to the configured ceiling.
fn bounded(derivative: f64, limit: Option<f64>) -> f64 {
    match limit {
        Some(limit) => derivative.clamp(-limit, limit),
        None => derivative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_rates() -> EffectiveRates {
        EffectiveRates { mu_max: 1e-6, qp_max: 1e-6, qs_max: 1e-6 }
    }

    #[test]
    fn test_batch_step_matches_hand_computation() {
        // Pure batch (F = 0): only the kinetic terms act.
        let params = KineticParams {
            pix: 4.0,
            pmx: 4.8,
            kis: 100.0,
            inhib: 1.0,
            feed_rate: 0.0,
            dt: 1.0,
            ..Default::default()
        };
        let rates = EffectiveRates { mu_max: 0.1, qp_max: 0.05, qs_max: 0.2 };
        let state = FermentationState::new(1.0, 0.0, 50.0, 2.0);

        let next = step(&state, &rates, &params).unwrap();

        // dX = 0.1·1·(1 − (0 − 4)/0.8) = 0.1·6 = 0.6
        let dx = 0.1 * (1.0 - (0.0 - 4.0) / 0.8);
        assert_relative_eq!(next.biomass, 1.0 + dx, epsilon = 1e-12);
        // dP = dx + 0.05·1·50/150 − 1·1/2
        let dp = dx + 0.05 * 50.0 / 150.0 - 0.5;
        assert_relative_eq!(next.product, (0.0 + dp).max(0.0), epsilon = 1e-12);
        // dS = −0.2·1·100/150
        assert_relative_eq!(next.substrate, 50.0 - 0.2 * 100.0 / 150.0, epsilon = 1e-12);
        assert_relative_eq!(next.volume, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inhibition_checked_first() {
        // Even a state that would divide by zero elsewhere never gets
        // that far: the window check precedes all derivative math.
        let params = KineticParams { pix: 5.0, pmx: 5.0 + 1e-9, ..Default::default() };
        let state = FermentationState::new(0.1, 0.02, 45.0, 0.5);
        assert!(matches!(
            step(&state, &unit_rates(), &params),
            Err(FermError::DegenerateInhibition { .. })
        ));
    }

    #[test]
    fn test_flow_rate_bound() {
        let params = KineticParams { feed_rate: 2.5, ..Default::default() };
        let state = FermentationState::new(0.1, 0.02, 45.0, 0.5);
        match step(&state, &unit_rates(), &params) {
            Err(FermError::FlowRateOutOfRange { feed_rate, limit }) => {
                assert_eq!(feed_rate, 2.5);
                assert_eq!(limit, 2.0);
            }
            other => panic!("expected FlowRateOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_volume_is_instability_not_panic() {
        let params = KineticParams { feed_rate: 0.2778, ..Default::default() };
        let state = FermentationState::new(0.1, 0.02, 45.0, 0.0);
        assert!(matches!(
            step(&state, &unit_rates(), &params),
            Err(FermError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_concentrations_clamped_non_negative() {
        // Aggressive consumption drives S below zero in one step; the
        // clamp keeps it physical.
        let params = KineticParams { feed_rate: 0.0, kis: 100.0, dt: 1.0, ..Default::default() };
        let rates = EffectiveRates { mu_max: 1e-6, qp_max: 1e-6, qs_max: 10.0 };
        let state = FermentationState::new(5.0, 0.0, 1.0, 1.0);

        let next = step(&state, &rates, &params).unwrap();
        assert_eq!(next.substrate, 0.0);
        assert!(next.is_physical());
    }

    #[test]
    fn test_volume_floor() {
        let params = KineticParams { feed_rate: 0.0, ..Default::default() };
        let state = FermentationState::new(0.0, 0.0, 0.0, 1e-10);
        let next = step(&state, &unit_rates(), &params).unwrap();
        assert_eq!(next.volume, VOLUME_FLOOR);
    }

    #[test]
    fn test_volume_cap_stops_feed_growth() {
        let params = KineticParams {
            feed_rate: 0.5,
            volume_cap: Some(2.0),
            dt: 1.0,
            ..Default::default()
        };
        let state = FermentationState::new(0.1, 0.02, 45.0, 2.0);
        let next = step(&state, &unit_rates(), &params).unwrap();
        // dV forced to 0 at the cap; dilution terms still use F
        assert_eq!(next.volume, 2.0);

        let below_cap = FermentationState::new(0.1, 0.02, 45.0, 1.0);
        let next = step(&below_cap, &unit_rates(), &params).unwrap();
        assert_relative_eq!(next.volume, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_limit_bounds_explosion() {
        let params = KineticParams {
            feed_rate: 0.0,
            derivative_limit: Some(10.0),
            pix: 4.0,
            pmx: 4.8,
            dt: 1.0,
            ..Default::default()
        };
        // mu_max large enough that raw dX ≫ limit
        let rates = EffectiveRates { mu_max: 1e4, qp_max: 1e-6, qs_max: 1e-6 };
        let state = FermentationState::new(1.0, 0.0, 1.0, 1.0);

        let next = step(&state, &rates, &params).unwrap();
        assert!(next.biomass <= 1.0 + 10.0 + 1e-12);
    }
}
