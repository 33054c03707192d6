// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer loads observations through this trait,
// so it never needs to know the records came from a CSV file.
//
// Implementations:
//   - CsvLoader → reads a delimited file from disk
//   - (tests)   → in-memory record lists
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::PipelineError;
use crate::domain::record::SensorRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the ordered list of sensor records.
pub trait RecordSource {
    /// Load every record, preserving the source order.
    fn load_all(&self) -> Result<Vec<SensorRecord>, PipelineError>;
}

/// An in-memory list is a source too — handy for tests and
/// for callers that already parsed their data elsewhere.
impl RecordSource for Vec<SensorRecord> {
    fn load_all(&self) -> Result<Vec<SensorRecord>, PipelineError> {
        Ok(self.clone())
    }
}
