//! Error types for FERMKIN.

use thiserror::Error;

/// Unified error type for all FERMKIN operations.
///
/// Every kinetic failure is raised synchronously from the point of
/// detection and propagated upward without local recovery; a failed tick
/// is terminal for that run.
#[derive(Error, Debug)]
pub enum FermError {
    /// Temperature at or below absolute zero, no meaningful reaction rate
    #[error("invalid temperature: {kelvin} K (must be > 0)")]
    InvalidTemperature { kelvin: f64 },

    /// Inhibition window Pmx − Pix collapsed below epsilon, the growth
    /// term's denominator is numerically meaningless
    #[error("degenerate inhibition window: Pix = {p_inhibit}, Pmx = {p_max}")]
    DegenerateInhibition { p_inhibit: f64, p_max: f64 },

    /// Feed rate outside the configured physical range
    #[error("flow rate out of range: F = {feed_rate} (limit {limit})")]
    FlowRateOutOfRange { feed_rate: f64, limit: f64 },

    /// A derivative evaluated to NaN or infinity
    #[error("numerical instability: {quantity} = {value}")]
    NumericalInstability { quantity: &'static str, value: f64 },

    /// Configuration validation errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors (trajectory export, profile loading)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FermError {
    /// Creates an invalid-temperature error.
    pub fn invalid_temperature(kelvin: f64) -> Self {
        FermError::InvalidTemperature { kelvin }
    }

    /// Creates a degenerate-inhibition error.
    pub fn degenerate_inhibition(p_inhibit: f64, p_max: f64) -> Self {
        FermError::DegenerateInhibition { p_inhibit, p_max }
    }

    /// Creates a flow-rate error.
    pub fn flow_rate(feed_rate: f64, limit: f64) -> Self {
        FermError::FlowRateOutOfRange { feed_rate, limit }
    }

    /// Creates a numerical-instability error for a named derivative.
    pub fn instability(quantity: &'static str, value: f64) -> Self {
        FermError::NumericalInstability { quantity, value }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        FermError::Config(message.into())
    }
}

/// Result type alias for FERMKIN operations.
pub type Result<T> = std::result::Result<T, FermError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let temp_err = FermError::invalid_temperature(-3.0);
        assert!(matches!(temp_err, FermError::InvalidTemperature { .. }));

        let inhib_err = FermError::degenerate_inhibition(4.8, 4.8);
        assert!(matches!(inhib_err, FermError::DegenerateInhibition { .. }));

        let config_err = FermError::config("dt must be positive");
        assert!(matches!(config_err, FermError::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = FermError::flow_rate(3.5, 2.0);
        assert_eq!(err.to_string(), "flow rate out of range: F = 3.5 (limit 2)");

        let err = FermError::instability("dP", f64::NAN);
        assert!(err.to_string().contains("dP"));
    }
}
