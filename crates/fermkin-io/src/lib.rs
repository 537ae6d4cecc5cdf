//! # fermkin-io
//!
//! Trajectory export and profile loading for FERMKIN.
//!
//! - [`csv_export`]: serialize a simulated trajectory to delimited text
//!   with a fixed header row
//! - [`profile_loader`]: read a temperature schedule from a CSV file

pub mod csv_export;
pub mod profile_loader;

pub use csv_export::{trajectory_to_csv, write_trajectory_csv, CSV_HEADER};
pub use profile_loader::load_temperature_profile;
