use std::fs;
use std::path::Path;

use crate::error::OrreryError;
use crate::model::{BodyRecord, Orrery};

/// Reads a JSON body catalog and assembles the orrery. All hierarchy and
/// element validation happens inside [`Orrery::from_records`]; a malformed
/// catalog refuses to load instead of producing NaN positions later.
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Orrery, OrreryError> {
    let text = fs::read_to_string(path)?;
    parse_catalog(&text)
}

pub fn parse_catalog(text: &str) -> Result<Orrery, OrreryError> {
    let records: Vec<BodyRecord> = serde_json::from_str(text)?;
    Orrery::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BodyKind;

    #[test]
    fn test_minimal_catalog_parses() {
        let text = r#"[
            {
                "name": "Sol",
                "kind": "star",
                "physical": {
                    "equatorial_diameter": 1.392e9,
                    "polar_diameter": 1.392e9,
                    "rotation_period_seconds": 2192832.0,
                    "pole_ra_deg": 286.13,
                    "pole_dec_deg": 63.87,
                    "mass": 1.989e30
                }
            },
            {
                "name": "Mercury",
                "kind": "planet",
                "parent": "Sol",
                "elements": {
                    "eccentricity": 0.2056,
                    "inclination_deg": 7.005,
                    "ascending_node_deg": 48.331,
                    "arg_periapsis_deg": 29.124,
                    "epoch_julian_seconds": 211813488000.0,
                    "mean_anomaly_deg": 174.796,
                    "semi_major_axis": 5.791e10
                }
            }
        ]"#;

        let orrery = parse_catalog(text).unwrap();
        assert_eq!(orrery.len(), 2);
        assert_eq!(orrery.root().name, "Sol");
        assert_eq!(orrery.body_by_name("Mercury").unwrap().kind, BodyKind::Planet);
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(matches!(
            parse_catalog("not even json"),
            Err(OrreryError::JsonError(_)),
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        assert!(matches!(
            read_catalog("no-such-catalog.json"),
            Err(OrreryError::IoError(_)),
        ));
    }
}
