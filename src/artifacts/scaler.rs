//! Fitted feature scalers.

use serde::Deserialize;

/// A fitted per-feature transform applied before inference.
pub trait Transform {
    /// Feature names the transform was fitted on, in column order.
    fn feature_names(&self) -> &[String];

    /// Number of per-feature parameters the scaler carries.
    ///
    /// Every parameter vector must have this many entries for the scaler to be usable.
    fn param_lens(&self) -> Vec<(&'static str, usize)>;

    /// Applies the transform to one row.
    ///
    /// `row` must have one entry per fitted feature; callers check the schema first.
    fn transform(&self, row: &[f64]) -> Vec<f64>;

    /// Returns a human-readable type name for the scaler.
    fn scaler_type(&self) -> &'static str;
}

/// Standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardScaler {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    /// Per-feature standard deviation. Zero entries act as 1.0.
    pub scale: Vec<f64>,
}

impl Transform for StandardScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn param_lens(&self) -> Vec<(&'static str, usize)> {
        vec![("mean", self.mean.len()), ("scale", self.scale.len())]
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let s = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / s
            })
            .collect()
    }

    fn scaler_type(&self) -> &'static str {
        "standard"
    }
}

fn unit_range() -> [f64; 2] {
    [0.0, 1.0]
}

/// Min-max normalization into `feature_range`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinMaxScaler {
    pub feature_names: Vec<String>,
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
    #[serde(default = "unit_range")]
    pub feature_range: [f64; 2],
}

impl Transform for MinMaxScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn param_lens(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("data_min", self.data_min.len()),
            ("data_max", self.data_max.len()),
        ]
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        let [lo, hi] = self.feature_range;
        row.iter()
            .zip(self.data_min.iter().zip(&self.data_max))
            .map(|(x, (min, max))| {
                let range = max - min;
                let s = if range == 0.0 { 1.0 } else { (hi - lo) / range };
                let m = lo - min * s;
                x * s + m
            })
            .collect()
    }

    fn scaler_type(&self) -> &'static str {
        "min_max"
    }
}

/// Scaler artifact, dispatched on the JSON `kind` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl Scaler {
    fn inner(&self) -> &dyn Transform {
        match self {
            Self::Standard(s) => s,
            Self::MinMax(s) => s,
        }
    }
}

impl Transform for Scaler {
    fn feature_names(&self) -> &[String] {
        self.inner().feature_names()
    }

    fn param_lens(&self) -> Vec<(&'static str, usize)> {
        self.inner().param_lens()
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        self.inner().transform(row)
    }

    fn scaler_type(&self) -> &'static str {
        self.inner().scaler_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("F{i}")).collect()
    }

    #[test]
    fn standard_centers_and_scales() {
        let s = StandardScaler {
            feature_names: names(2),
            mean: vec![10.0, 0.5],
            scale: vec![5.0, 0.25],
        };
        assert_eq!(s.transform(&[20.0, 0.0]), vec![2.0, -2.0]);
    }

    #[test]
    fn standard_zero_scale_only_centers() {
        let s = StandardScaler {
            feature_names: names(1),
            mean: vec![3.0],
            scale: vec![0.0],
        };
        assert_eq!(s.transform(&[4.5]), vec![1.5]);
    }

    #[test]
    fn min_max_maps_into_range() {
        let s = MinMaxScaler {
            feature_names: names(2),
            data_min: vec![0.0, 10.0],
            data_max: vec![2.0, 20.0],
            feature_range: [-1.0, 1.0],
        };
        assert_eq!(s.transform(&[1.0, 20.0]), vec![0.0, 1.0]);
    }

    #[test]
    fn min_max_constant_column_is_shifted() {
        let s = MinMaxScaler {
            feature_names: names(1),
            data_min: vec![4.0],
            data_max: vec![4.0],
            feature_range: [0.0, 1.0],
        };
        assert_eq!(s.transform(&[4.0]), vec![0.0]);
    }

    #[test]
    fn parses_tagged_json() {
        let json = r#"{"kind":"min_max","feature_names":["A"],"data_min":[0.0],"data_max":[1.0]}"#;
        let s: Scaler = serde_json::from_str(json).expect("min-max JSON should parse");
        assert_eq!(s.scaler_type(), "min_max");
        match s {
            Scaler::MinMax(m) => assert_eq!(m.feature_range, [0.0, 1.0]),
            other => panic!("expected min-max scaler, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let json = r#"{"kind":"robust","feature_names":[]}"#;
        assert!(serde_json::from_str::<Scaler>(json).is_err());
    }
}
