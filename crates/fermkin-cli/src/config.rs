//! Scenario configuration.
//!
//! Provides serde-based TOML parsing for a complete simulation scenario:
//! initial broth state, kinetic parameters, temperature schedule and
//! output destination. Every field has an explicit default so a partial
//! file (or none at all) still yields a runnable scenario.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use fermkin_core::{FermentationState, TemperatureProfile};
use fermkin_io::load_temperature_profile;
use fermkin_kinetics::KineticParams;

/// Root configuration for a simulation scenario.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub initial: InitialConditions,

    #[serde(default)]
    pub params: KineticParams,

    #[serde(default)]
    pub temperature: TemperatureConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl ScenarioConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {path}"))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse scenario TOML")
    }

    /// Validate scenario consistency.
    pub fn validate(&self) -> Result<()> {
        self.params
            .validate()
            .context("invalid kinetic parameters")?;

        if self.run.time_steps == 0 {
            bail!("run.time_steps must be > 0");
        }

        let state = self.initial.to_state();
        if !state.is_physical() {
            bail!(
                "initial state is not physical: X={}, P={}, S={}, V={}",
                state.biomass,
                state.product,
                state.substrate,
                state.volume
            );
        }

        self.temperature.validate()?;
        Ok(())
    }
}

/// Initial broth state. Defaults are the reference scenario's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialConditions {
    #[serde(default = "default_biomass")]
    pub biomass: f64,

    #[serde(default = "default_product")]
    pub product: f64,

    #[serde(default = "default_substrate")]
    pub substrate: f64,

    #[serde(default = "default_volume")]
    pub volume: f64,
}

impl InitialConditions {
    /// The seed state for a run.
    pub fn to_state(&self) -> FermentationState {
        FermentationState::new(self.biomass, self.product, self.substrate, self.volume)
    }
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            biomass: default_biomass(),
            product: default_product(),
            substrate: default_substrate(),
            volume: default_volume(),
        }
    }
}

/// How the temperature schedule is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureMode {
    /// Flat profile at `base` K
    Constant,
    /// `base + amplitude·sin(2πi/len)` over the run length
    #[default]
    Sinusoidal,
    /// Loaded from the CSV named by `path`
    File,
}

/// Temperature schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureConfig {
    #[serde(default)]
    pub mode: TemperatureMode,

    #[serde(default = "default_temp_base")]
    pub base: f64,

    #[serde(default = "default_temp_amplitude")]
    pub amplitude: f64,

    #[serde(default)]
    pub path: Option<String>,
}

impl TemperatureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.mode == TemperatureMode::File && self.path.is_none() {
            bail!("temperature.mode = \"file\" requires temperature.path");
        }
        if self.base <= 0.0 {
            bail!("temperature.base must be > 0 K (got {})", self.base);
        }
        Ok(())
    }

    /// Materialize the profile for a run of `len` ticks.
    pub fn build(&self, len: usize) -> Result<TemperatureProfile> {
        let profile = match self.mode {
            TemperatureMode::Constant => TemperatureProfile::constant(self.base, len),
            TemperatureMode::Sinusoidal => {
                TemperatureProfile::sinusoidal(self.base, self.amplitude, len)
            }
            TemperatureMode::File => {
                let path = self
                    .path
                    .as_deref()
                    .context("temperature.mode = \"file\" requires temperature.path")?;
                load_temperature_profile(path)?
            }
        };
        Ok(profile)
    }
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            mode: TemperatureMode::default(),
            base: default_temp_base(),
            amplitude: default_temp_amplitude(),
            path: None,
        }
    }
}

/// Run length configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_time_steps")]
    pub time_steps: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { time_steps: default_time_steps() }
    }
}

/// Output destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

fn default_biomass() -> f64 {
    0.137
}
fn default_product() -> f64 {
    0.024
}
fn default_substrate() -> f64 {
    41.246
}
fn default_volume() -> f64 {
    500.0
}
fn default_temp_base() -> f64 {
    300.0
}
fn default_temp_amplitude() -> f64 {
    5.0
}
fn default_time_steps() -> usize {
    18_000
}
fn default_output_path() -> String {
    "fermentation.csv".to_string()
}
