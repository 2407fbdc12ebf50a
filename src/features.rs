//! Fixed-schema feature record consumed by the scaler and model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of features in the schema.
pub const FEATURE_COUNT: usize = 7;

/// Feature names in the exact order the artifacts were fitted on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "AMBIENT_TEMPERATURE",
    "MODULE_TEMPERATURE",
    "IRRADIATION",
    "MONTH",
    "DAY_OF_YEAR",
    "HOUR",
    "MINUTE",
];

/// One set of model inputs.
///
/// Field declaration order matches [`FEATURE_NAMES`], so serde (and the CSV
/// header it produces) follows the fitted schema as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureRecord {
    /// Ambient air temperature (°C).
    #[serde(rename = "AMBIENT_TEMPERATURE")]
    pub ambient_temperature: f64,
    /// Panel module temperature (°C).
    #[serde(rename = "MODULE_TEMPERATURE")]
    pub module_temperature: f64,
    /// Irradiation level (kW/m²).
    #[serde(rename = "IRRADIATION")]
    pub irradiation: f64,
    /// Month of year (1-12).
    #[serde(rename = "MONTH")]
    pub month: u32,
    /// Day of year (1-365).
    #[serde(rename = "DAY_OF_YEAR")]
    pub day_of_year: u32,
    /// Hour of day (0-23).
    #[serde(rename = "HOUR")]
    pub hour: u32,
    /// Minute of hour (0, 15, 30, 45).
    #[serde(rename = "MINUTE")]
    pub minute: u32,
}

impl FeatureRecord {
    /// Returns the documented default inputs.
    pub fn defaults() -> Self {
        Self {
            ambient_temperature: 30.0,
            module_temperature: 45.0,
            irradiation: 0.5,
            month: 6,
            day_of_year: 150,
            hour: 12,
            minute: 30,
        }
    }

    /// Returns the values in [`FEATURE_NAMES`] order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.ambient_temperature,
            self.module_temperature,
            self.irradiation,
            f64::from(self.month),
            f64::from(self.day_of_year),
            f64::from(self.hour),
            f64::from(self.minute),
        ]
    }

    /// Returns `(name, value)` pairs in schema order.
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_vector())
    }

    /// Formats a single value the way the record table shows it.
    ///
    /// Integer features print without a fractional part.
    pub fn format_value(index: usize, value: f64) -> String {
        if index >= 3 {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        }
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::defaults()
    }
}

/// One-row table: a header line of feature names and a line of values.
impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = FEATURE_NAMES.iter().map(|n| n.len()).collect();
        for (name, &w) in FEATURE_NAMES.iter().zip(&widths) {
            write!(f, "{name:>w$} ")?;
        }
        writeln!(f)?;
        for (i, ((_, value), &w)) in self.named_values().zip(&widths).enumerate() {
            write!(f, "{:>w$} ", Self::format_value(i, value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_follows_schema_order() {
        let r = FeatureRecord::defaults();
        assert_eq!(r.to_vector(), [30.0, 45.0, 0.5, 6.0, 150.0, 12.0, 30.0]);
    }

    #[test]
    fn named_values_pair_names_with_values() {
        let r = FeatureRecord::defaults();
        let pairs: Vec<_> = r.named_values().collect();
        assert_eq!(pairs[2], ("IRRADIATION", 0.5));
        assert_eq!(pairs[6], ("MINUTE", 30.0));
    }

    #[test]
    fn display_has_header_and_value_rows() {
        let text = FeatureRecord::defaults().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("AMBIENT_TEMPERATURE"));
        assert!(lines[1].contains("0.50"));
        assert!(lines[1].contains("150"));
    }

    #[test]
    fn serde_uses_schema_names() {
        let json =
            serde_json::to_string(&FeatureRecord::defaults()).expect("record should serialize");
        assert!(json.starts_with("{\"AMBIENT_TEMPERATURE\":30.0"));
        assert!(json.contains("\"DAY_OF_YEAR\":150"));
    }
}
