// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every failure in this pipeline is fatal. Each one gets a named
// variant so callers (and tests) can tell a bad file apart from
// a dataset that is simply too small, instead of seeing a tensor
// shape mismatch deep inside the training loop.
//
// Three families:
//   - input errors:          the file itself is missing or malformed
//   - data-integrity errors: the file parsed but cannot be trained on
//   - configuration errors:  the run parameters are unusable

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Input errors ─────────────────────────────────────────────────────────
    #[error("cannot open dataset '{}': {source}", path.display())]
    DatasetOpen {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in '{}': {source}", path.display())]
    Csv {
        path:   PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{}' line {line}: expected {expected} columns, found {found}", path.display())]
    ColumnCount {
        path:     PathBuf,
        line:     u64,
        expected: usize,
        found:    usize,
    },

    #[error("'{}' line {line}: column '{column}' has non-numeric value '{value}'", path.display())]
    InvalidNumber {
        path:   PathBuf,
        line:   u64,
        column: &'static str,
        value:  String,
    },

    #[error("dataset '{}' contains no data rows", path.display())]
    EmptyDataset { path: PathBuf },

    // ── Data-integrity errors ────────────────────────────────────────────────
    #[error("no rows left after keeping only risk labels {valid:?}")]
    NoValidRows { valid: Vec<String> },

    #[error("expected {expected} distinct risk classes after filtering, found {}: {classes:?}", classes.len())]
    ClassCount {
        expected: usize,
        classes:  Vec<String>,
    },

    #[error("risk label '{0}' was not seen when the label encoder was fitted")]
    UnknownLabel(String),

    #[error("class code {code} is out of range for {num_classes} classes")]
    ClassCodeOutOfRange { code: usize, num_classes: usize },

    #[error(
        "window length {window_length} needs more than {window_length} rows, \
         but only {rows} rows remain after filtering"
    )]
    NotEnoughRows { rows: usize, window_length: usize },

    #[error(
        "splitting {samples} samples with test fraction {test_fraction} \
         leaves the train or test subset empty"
    )]
    EmptySplit { samples: usize, test_fraction: f64 },

    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
