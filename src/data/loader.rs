// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads the sensor CSV into an ordered Vec<SensorRecord>.
//
// File contract:
//   - exactly 6 columns per row, in canonical order:
//       temperature, humidity, precipitation, soil_moisture, elevation, risk
//   - a header row is optional; whatever names it carries are
//     replaced by the canonical ones
//   - row order is preserved exactly as read
//
// Header detection: the first record is a header when any of its
// five feature fields fails to parse as a number.
//
// Every problem here is fatal — a missing file, a row with the
// wrong column count, or a non-numeric feature aborts the run
// with a named error pointing at the offending line.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs::File, path::PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::domain::error::PipelineError;
use crate::domain::record::{
    SensorRecord, COLUMN_COUNT, FEATURE_COUNT, FEATURE_NAMES, TARGET_COLUMN,
};
use crate::domain::traits::RecordSource;

/// Loads sensor records from a comma-delimited file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse one CSV record into a SensorRecord, checking the
    /// column count first so columns are never mis-assigned.
    fn parse_record(&self, raw: &StringRecord) -> Result<SensorRecord, PipelineError> {
        let line = line_of(raw);
        if raw.len() != COLUMN_COUNT {
            return Err(PipelineError::ColumnCount {
                path:     self.path.clone(),
                line,
                expected: COLUMN_COUNT,
                found:    raw.len(),
            });
        }

        let mut features = [0.0f64; FEATURE_COUNT];
        for (i, slot) in features.iter_mut().enumerate() {
            let value = raw[i].trim();
            *slot = value.parse::<f64>().map_err(|_| PipelineError::InvalidNumber {
                path:   self.path.clone(),
                line,
                column: FEATURE_NAMES[i],
                value:  value.to_string(),
            })?;
        }

        // The label is kept verbatim: " High" is a variant, not "High".
        Ok(SensorRecord::from_features(features, &raw[FEATURE_COUNT]))
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<SensorRecord>, PipelineError> {
        let file = File::open(&self.path).map_err(|source| PipelineError::DatasetOpen {
            path: self.path.clone(),
            source,
        })?;

        // flexible(true): we want to report column-count problems
        // ourselves, with the canonical expectation in the message.
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        let mut first   = true;

        for result in rdr.records() {
            let raw = result.map_err(|source| PipelineError::Csv {
                path: self.path.clone(),
                source,
            })?;

            // Skip completely empty lines (trailing newlines, etc.)
            if raw.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            if first {
                first = false;
                if is_header(&raw) {
                    if raw.len() != COLUMN_COUNT {
                        return Err(PipelineError::ColumnCount {
                            path:     self.path.clone(),
                            line:     line_of(&raw),
                            expected: COLUMN_COUNT,
                            found:    raw.len(),
                        });
                    }
                    tracing::debug!(
                        "Header {:?} renamed to {:?} + '{}'",
                        raw.iter().collect::<Vec<_>>(),
                        FEATURE_NAMES,
                        TARGET_COLUMN,
                    );
                    continue;
                }
            }

            records.push(self.parse_record(&raw)?);
        }

        if records.is_empty() {
            return Err(PipelineError::EmptyDataset { path: self.path.clone() });
        }

        tracing::info!(
            "Loaded {} rows from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// A record is a header when none of its feature fields is a number.
/// A data row with a single bad value still goes through parse_record
/// and fails there.
fn is_header(raw: &StringRecord) -> bool {
    raw.iter()
        .take(FEATURE_COUNT)
        .all(|f| f.trim().parse::<f64>().is_err())
}

fn line_of(raw: &StringRecord) -> u64 {
    raw.position().map(|p| p.line()).unwrap_or(0)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_reads_rows_with_header() {
        let f = write_csv(
            "Temp (C),Hum,Rain,Soil,Elev,Landslide Risk\n\
             20.5,60,1.2,0.3,1200,Low\n\
             22.0,65,3.4,0.5,1150,High\n",
        );
        let records = CsvLoader::new(f.path()).load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].temperature, 20.5);
        assert_eq!(records[1].elevation, 1150.0);
        assert_eq!(records[1].risk, "High");
    }

    #[test]
    fn test_reads_rows_without_header() {
        let f = write_csv("1,2,3,4,5,Low\n6,7,8,9,10,Moderate\n");
        let records = CsvLoader::new(f.path()).load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].features(), [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_preserves_row_order() {
        let f = write_csv("a,b,c,d,e,f\n3,0,0,0,0,Low\n1,0,0,0,0,Low\n2,0,0,0,0,Low\n");
        let temps: Vec<f64> = CsvLoader::new(f.path())
            .load_all()
            .unwrap()
            .iter()
            .map(|r| r.temperature)
            .collect();
        assert_eq!(temps, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_keeps_unknown_labels_for_the_filter() {
        let f = write_csv("1,2,3,4,5,Unknown\n1,2,3,4,5,\n");
        let records = CsvLoader::new(f.path()).load_all().unwrap();
        assert_eq!(records[0].risk, "Unknown");
        assert_eq!(records[1].risk, "");
    }

    #[test]
    fn test_padded_labels_are_kept_verbatim_and_filtered_out() {
        use crate::data::label_encoder::filter_valid_risks;

        let f = write_csv("1,2,3,4,5, High\n1,2,3,4,5,Low \n1,2,3,4,5,Moderate\n");
        let records = CsvLoader::new(f.path()).load_all().unwrap();
        assert_eq!(records[0].risk, " High");
        assert_eq!(records[1].risk, "Low ");

        let kept = filter_valid_risks(records).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].risk, "Moderate");
    }

    #[test]
    fn test_malformed_first_row_is_not_mistaken_for_header() {
        let f = write_csv("1,2,wet,4,5,Low\n1,2,3,4,5,Low\n");
        let err = CsvLoader::new(f.path()).load_all().unwrap_err();
        match err {
            PipelineError::InvalidNumber { line, column, value, .. } => {
                assert_eq!(line, 1);
                assert_eq!(column, "precipitation");
                assert_eq!(value, "wet");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = CsvLoader::new("/definitely/not/here.csv").load_all().unwrap_err();
        assert!(matches!(err, PipelineError::DatasetOpen { .. }));
    }

    #[test]
    fn test_wrong_column_count_is_fatal() {
        let f = write_csv("1,2,3,4,5,Low\n1,2,3,4,Low\n");
        let err = CsvLoader::new(f.path()).load_all().unwrap_err();
        match err {
            PipelineError::ColumnCount { line, expected, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 6);
                assert_eq!(found, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_with_wrong_column_count_is_fatal() {
        let f = write_csv("a,b,c,d,e,f,g\n1,2,3,4,5,Low\n");
        let err = CsvLoader::new(f.path()).load_all().unwrap_err();
        assert!(matches!(err, PipelineError::ColumnCount { found: 7, .. }));
    }

    #[test]
    fn test_non_numeric_feature_is_fatal() {
        let f = write_csv("1,2,3,4,5,Low\n1,2,wet,4,5,Low\n");
        let err = CsvLoader::new(f.path()).load_all().unwrap_err();
        match err {
            PipelineError::InvalidNumber { column, value, .. } => {
                assert_eq!(column, "precipitation");
                assert_eq!(value, "wet");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let f = write_csv("a,b,c,d,e,f\n\n");
        let err = CsvLoader::new(f.path()).load_all().unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDataset { .. }));
    }
}
