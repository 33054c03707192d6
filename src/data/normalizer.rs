// ============================================================
// Layer 4 — Feature Normalizer
// ============================================================
// Min-max scaling per feature column:
//
//     x' = (x - min) / (max - min)
//
// so the smallest observed value becomes 0.0 and the largest 1.0.
// A constant column (max == min) maps to 0.0, matching
// scikit-learn's MinMaxScaler.
//
// The statistics are fitted ONCE over the whole filtered dataset,
// before the train/test split, and reused for every row. That is
// the behaviour the reference experiments were run with, test rows
// included in the fit.

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;
use crate::domain::record::FEATURE_COUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: [f64; FEATURE_COUNT],
    pub data_max: [f64; FEATURE_COUNT],
}

impl MinMaxScaler {
    /// Fit per-column min/max over all rows.
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> Result<Self, PipelineError> {
        if rows.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "cannot fit the feature scaler on zero rows".to_string(),
            ));
        }

        let mut data_min = [f64::INFINITY; FEATURE_COUNT];
        let mut data_max = [f64::NEG_INFINITY; FEATURE_COUNT];
        for row in rows {
            for (i, &v) in row.iter().enumerate() {
                data_min[i] = data_min[i].min(v);
                data_max[i] = data_max[i].max(v);
            }
        }

        tracing::debug!("Scaler fitted: min={:?} max={:?}", data_min, data_max);
        Ok(Self { data_min, data_max })
    }

    pub fn transform(&self, row: &[f64; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
        let mut out = [0.0f32; FEATURE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            let range = self.data_max[i] - self.data_min[i];
            *slot = if range == 0.0 {
                0.0
            } else {
                ((row[i] - self.data_min[i]) / range) as f32
            };
        }
        out
    }

    pub fn transform_all(&self, rows: &[[f64; FEATURE_COUNT]]) -> Vec<[f32; FEATURE_COUNT]> {
        rows.iter().map(|r| self.transform(r)).collect()
    }

    pub fn fit_transform(
        rows: &[[f64; FEATURE_COUNT]],
    ) -> Result<(Self, Vec<[f32; FEATURE_COUNT]>), PipelineError> {
        let scaler = Self::fit(rows)?;
        let scaled = scaler.transform_all(rows);
        Ok((scaler, scaled))
    }
}
