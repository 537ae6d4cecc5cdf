//! CSV trajectory export.
//!
//! Column order is the contract with downstream consumers: time,
//! biomass, product, substrate, volume, temperature, pH.

use std::fs;
use std::path::Path;

use log::info;

use fermkin_core::{Result, TrajectorySample};

/// Fixed header row of the trajectory CSV.
pub const CSV_HEADER: &str =
    "time_s,biomass_g_l,lactic_acid_g_l,lactose_g_l,volume_l,temperature_k,ph";

/// Render a trajectory to CSV text.
pub fn trajectory_to_csv(trajectory: &[TrajectorySample]) -> String {
    let mut csv = String::with_capacity(64 * (trajectory.len() + 1));
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for sample in trajectory {
        csv.push_str(&format!(
            "{:.1},{:.4},{:.4},{:.4},{:.4},{:.2},{:.2}\n",
            sample.time,
            sample.biomass,
            sample.product,
            sample.substrate,
            sample.volume,
            sample.temperature,
            sample.ph,
        ));
    }

    csv
}

/// Write a trajectory CSV to `path`.
pub fn write_trajectory_csv(path: impl AsRef<Path>, trajectory: &[TrajectorySample]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, trajectory_to_csv(trajectory))?;
    info!("wrote {} trajectory rows to {}", trajectory.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64) -> TrajectorySample {
        TrajectorySample {
            time,
            biomass: 0.137,
            product: 0.024,
            substrate: 41.246,
            volume: 500.0,
            temperature: 300.0,
            ph: 4.52,
        }
    }

    #[test]
    fn test_csv_shape() {
        let csv = trajectory_to_csv(&[sample(0.0), sample(1.0)]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0.0,0.1370,0.0240,41.2460,500.0000,300.00,4.52");
        assert_eq!(lines[2].split(',').count(), 7);
    }

    #[test]
    fn test_empty_trajectory_is_header_only() {
        let csv = trajectory_to_csv(&[]);
        assert_eq!(csv, format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = std::env::temp_dir();
        let path = dir.join("fermkin_csv_export_test.csv");

        write_trajectory_csv(&path, &[sample(0.0)]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(CSV_HEADER));
        assert_eq!(content.lines().count(), 2);

        let _ = fs::remove_file(&path);
    }
}
