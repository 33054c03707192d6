// ============================================================
// Layer 4 — Label One-Hot Encoder
// ============================================================
// Expands integer class codes into fixed-width target vectors:
//
//   code 2, 3 classes → [0.0, 0.0, 1.0]
//
// A code outside 0..num_classes means more classes slipped past
// the label filter than the model can output. That is a
// data-integrity error, never silently truncated.

use crate::domain::error::PipelineError;

pub fn one_hot(code: usize, num_classes: usize) -> Result<Vec<f32>, PipelineError> {
    if code >= num_classes {
        return Err(PipelineError::ClassCodeOutOfRange { code, num_classes });
    }
    let mut row = vec![0.0f32; num_classes];
    row[code] = 1.0;
    Ok(row)
}

/// One row per input code, in the same order.
pub fn one_hot_encode(codes: &[usize], num_classes: usize) -> Result<Vec<Vec<f32>>, PipelineError> {
    codes.iter().map(|&c| one_hot(c, num_classes)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_index(row: &[f32]) -> Option<usize> {
        row.iter().position(|&v| v == 1.0)
    }

    #[test]
    fn test_single_hot_entry_at_code() {
        let rows = one_hot_encode(&[0, 2, 1, 2], 3).unwrap();
        assert_eq!(rows[0], vec![1.0, 0.0, 0.0]);
        assert_eq!(rows[1], vec![0.0, 0.0, 1.0]);
        for (row, code) in rows.iter().zip([0, 2, 1, 2]) {
            assert_eq!(row.iter().sum::<f32>(), 1.0);
            assert_eq!(hot_index(row), Some(code));
        }
    }

    #[test]
    fn test_out_of_range_code_is_fatal() {
        let err = one_hot_encode(&[0, 3], 3).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ClassCodeOutOfRange { code: 3, num_classes: 3 }
        ));
    }
}
