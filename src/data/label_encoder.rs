// ============================================================
// Layer 4 — Label Filter & Encoder
// ============================================================
// Two jobs:
//
//   1. filter_valid_risks: keep only rows whose risk is one of
//      Low / Moderate / High. Typos, variants ("high"), blanks and
//      any other value are dropped silently. Fewer rows means
//      fewer windows later on.
//
//   2. LabelEncoder: map label strings to integer class codes.
//      Codes are assigned over the SORTED distinct labels, exactly
//      like scikit-learn's LabelEncoder. For the standard set:
//
//          High → 0    Low → 1    Moderate → 2
//
//      The mapping is data-derived, so it is always logged and
//      persisted next to the model weights.
//
// Reference: Rust Book §8 (Collections)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;
use crate::domain::record::{SensorRecord, NUM_CLASSES, VALID_RISKS};

/// Distinct risk labels in order of first appearance.
pub fn distinct_labels(records: &[SensorRecord]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for r in records {
        if !seen.iter().any(|s| s == &r.risk) {
            seen.push(r.risk.clone());
        }
    }
    seen
}

/// Keep only rows with a trained risk label. Order is preserved.
pub fn filter_valid_risks(records: Vec<SensorRecord>) -> Result<Vec<SensorRecord>, PipelineError> {
    let before = records.len();
    let kept: Vec<SensorRecord> = records
        .into_iter()
        .filter(SensorRecord::has_valid_risk)
        .collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        tracing::warn!("Dropped {} of {} rows with an unrecognised risk label", dropped, before);
    }

    if kept.is_empty() {
        return Err(PipelineError::NoValidRows {
            valid: VALID_RISKS.iter().map(|s| s.to_string()).collect(),
        });
    }
    Ok(kept)
}

/// Bijection between the distinct labels seen at fit time and 0..n.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Index in this Vec is the class code.
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on the given labels. Exactly NUM_CLASSES distinct values
    /// must be present, otherwise the classifier head cannot line up.
    pub fn fit<'a, I>(labels: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        if classes.len() != NUM_CLASSES {
            return Err(PipelineError::ClassCount { expected: NUM_CLASSES, classes });
        }
        Ok(Self { classes })
    }

    pub fn transform(&self, label: &str) -> Result<usize, PipelineError> {
        self.classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| PipelineError::UnknownLabel(label.to_string()))
    }

    pub fn inverse_transform(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    /// Encode every record's risk, in order.
    pub fn encode_records(&self, records: &[SensorRecord]) -> Result<Vec<usize>, PipelineError> {
        records.iter().map(|r| self.transform(&r.risk)).collect()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// (label, code) pairs in code order — what gets printed and persisted.
    pub fn mapping(&self) -> Vec<(&str, usize)> {
        (0..self.num_classes())
            .filter_map(|code| self.inverse_transform(code).map(|label| (label, code)))
            .collect()
    }
}
