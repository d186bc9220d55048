//! Input loader: a JSON array of vehicle records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fleet_pipeline::Vehicle;

/// Load the full input batch from a JSON file.
///
/// The pipeline expects the whole sequence in memory before dispatch begins,
/// so this reads and parses eagerly.
pub fn load_vehicles(path: &Path) -> Result<Vec<Vehicle>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    parse_vehicles(&data)
}

/// Parse a JSON array of vehicle records.
pub fn parse_vehicles(data: &str) -> Result<Vec<Vehicle>> {
    serde_json::from_str(data).context("input is not a JSON array of vehicle records")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_record_array() {
        let data = r#"[
            {"make": "Volvo", "year": 2008, "mileage": 180000},
            {"make": "Skoda", "year": 2019, "mileage": 42000}
        ]"#;

        let vehicles = parse_vehicles(data).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].make, "Volvo");
        assert_eq!(vehicles[1].year, 2019);
        assert_eq!(vehicles[1].mileage, 42_000);
    }

    #[test]
    fn rejects_records_with_missing_fields() {
        let data = r#"[{"make": "Volvo", "year": 2008}]"#;
        assert!(parse_vehicles(data).is_err());
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_vehicles(r#"{"make": "Volvo"}"#).is_err());
    }
}
