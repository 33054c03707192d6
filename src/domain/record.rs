// ============================================================
// Layer 3 — Sensor Record Domain Type
// ============================================================
// One time-ordered observation from the field sensors.
//
// The dataset file carries six columns in a fixed order:
//
//   temperature, humidity, precipitation, soil_moisture, elevation, risk
//
// The first five are numeric features, the last is the class label.
// Row order matters: windows are built over consecutive rows.

use serde::{Deserialize, Serialize};

/// Canonical names for the five feature columns, in file order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "temperature",
    "humidity",
    "precipitation",
    "soil_moisture",
    "elevation",
];

/// Canonical name of the label column (always the last column).
pub const TARGET_COLUMN: &str = "risk";

/// Number of numeric feature columns.
pub const FEATURE_COUNT: usize = 5;

/// Total number of columns a dataset row must have.
pub const COLUMN_COUNT: usize = FEATURE_COUNT + 1;

/// Risk labels the classifier is trained on. Anything else is dropped.
pub const VALID_RISKS: [&str; NUM_CLASSES] = ["Low", "Moderate", "High"];

/// Width of the one-hot target and of the model output.
pub const NUM_CLASSES: usize = 3;

/// A raw observation exactly as read from the dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub temperature:   f64,
    pub humidity:      f64,
    pub precipitation: f64,
    pub soil_moisture: f64,
    pub elevation:     f64,
    pub risk:          String,
}

impl SensorRecord {
    /// Feature values in canonical column order.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.temperature,
            self.humidity,
            self.precipitation,
            self.soil_moisture,
            self.elevation,
        ]
    }

    /// Build a record from feature values in canonical order.
    pub fn from_features(features: [f64; FEATURE_COUNT], risk: impl Into<String>) -> Self {
        let [temperature, humidity, precipitation, soil_moisture, elevation] = features;
        Self {
            temperature,
            humidity,
            precipitation,
            soil_moisture,
            elevation,
            risk: risk.into(),
        }
    }

    /// True when the risk label is one of the three trained classes.
    pub fn has_valid_risk(&self) -> bool {
        VALID_RISKS.contains(&self.risk.as_str())
    }
}
