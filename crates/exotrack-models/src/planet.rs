//! Planet records from the read-only dataset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::organize::DatasetField;

/// A single record of the exoplanet dataset.
///
/// The dataset is ingested by an external process and its schema is not
/// under our control, so the record is kept as a raw JSON object with
/// lenient accessors. Numeric fields may arrive as JSON numbers or as
/// numeric strings; anything else reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanetRecord(pub Map<String, Value>);

impl PlanetRecord {
    /// Year the planet was discovered, if present and numeric.
    pub fn discovery_year(&self) -> Option<i64> {
        coerce_f64(self.0.get(DatasetField::DiscoveryYear.key())?).map(|y| y as i64)
    }

    /// Numeric value of an aggregation field, if present and numeric.
    pub fn numeric_field(&self, field: DatasetField) -> Option<f64> {
        coerce_f64(self.0.get(field.key())?)
    }
}

/// Coerce a JSON value to f64, accepting numbers and numeric strings.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> PlanetRecord {
        serde_json::from_value(value).expect("planet record")
    }

    #[test]
    fn reads_numeric_fields() {
        let planet = record(json!({
            "pl_name": "Kepler-22 b",
            "disc_year": 2011,
            "pl_masse": 36.0,
            "pl_rade": "2.4",
            "pl_orbper": 289.9
        }));

        assert_eq!(planet.discovery_year(), Some(2011));
        assert_eq!(planet.numeric_field(DatasetField::Mass), Some(36.0));
        // Numeric strings are coerced
        assert_eq!(planet.numeric_field(DatasetField::Radius), Some(2.4));
    }

    #[test]
    fn missing_or_non_numeric_fields_read_as_absent() {
        let planet = record(json!({
            "pl_name": "HD 209458 b",
            "disc_year": 1999,
            "pl_masse": "unknown"
        }));

        assert_eq!(planet.numeric_field(DatasetField::Mass), None);
        assert_eq!(planet.numeric_field(DatasetField::Radius), None);
        assert_eq!(planet.discovery_year(), Some(1999));
    }

    #[test]
    fn extra_fields_survive_roundtrip() {
        let planet = record(json!({
            "pl_name": "TRAPPIST-1 e",
            "disc_year": 2017,
            "hostname": "TRAPPIST-1"
        }));

        let json = serde_json::to_string(&planet).unwrap();
        let decoded: PlanetRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, planet);
        assert_eq!(decoded.0.get("hostname"), Some(&json!("TRAPPIST-1")));
    }
}
