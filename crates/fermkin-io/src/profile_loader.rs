//! Temperature profile loading.
//!
//! Reads a schedule from a CSV file with a single `temperature_k`
//! column, one sample per tick.

use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use log::debug;

use fermkin_core::TemperatureProfile;

/// Load a temperature profile from `path`.
///
/// The file must have a header row; the first column of each record is
/// parsed as Kelvin. Samples are validated (strictly positive) before
/// the profile is returned.
pub fn load_temperature_profile(path: impl AsRef<Path>) -> Result<TemperatureProfile> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open temperature profile {}", path.display()))?;

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV row {}", row + 1))?;
        let field = match record.get(0) {
            Some(f) => f.trim(),
            None => bail!("row {} has no temperature field", row + 1),
        };
        let kelvin: f64 = field
            .parse()
            .with_context(|| format!("row {}: '{}' is not a temperature", row + 1, field))?;
        samples.push(kelvin);
    }

    if samples.is_empty() {
        bail!("temperature profile {} holds no samples", path.display());
    }

    debug!("loaded {} temperature samples from {}", samples.len(), path.display());

    let profile = TemperatureProfile::from_samples(samples);
    profile
        .validate()
        .with_context(|| format!("temperature profile {} is invalid", path.display()))?;
    Ok(profile)
}
