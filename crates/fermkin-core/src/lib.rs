//! # fermkin-core
//!
//! Core types and errors for the FERMKIN fermentation simulator.
//!
//! This crate defines the fundamental abstractions shared by all FERMKIN
//! components:
//! - **State**: the four-variable reactor state and trajectory snapshots
//! - **Profiles**: externally supplied temperature schedules
//! - **Errors**: unified error handling with `FermError`
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  fermkin-core    │  ← state / profiles / errors
//! └──────────────────┘
//!          ▲
//!          │
//! ┌────────┴─────────┐
//! │ fermkin-kinetics │  ← rate model, stepper, pH, driver
//! └──────────────────┘
//!          ▲
//!     ┌────┴─────┐
//! ┌───▼────┐ ┌───▼─────┐
//! │  -io   │ │  -cli   │
//! └────────┘ └─────────┘
//! ```

pub mod errors;
pub mod profile;
pub mod state;

// Re-export commonly used items
pub use errors::{FermError, Result};
pub use profile::TemperatureProfile;
pub use state::{FermentationState, Trajectory, TrajectorySample};
