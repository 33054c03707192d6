// ============================================================
// Layer 4 — Windowing
// ============================================================
// Slides a fixed-length window over the ordered rows, one row at
// a time, and pairs each window with the label of the row right
// AFTER it (next-step prediction).
//
// Example with window_length = 3 and rows r0..r5:
//   window 0: [r0 r1 r2] → label of r3
//   window 1: [r1 r2 r3] → label of r4
//   window 2: [r2 r3 r4] → label of r5
//
// Total windows = rows - window_length (zero when rows ≤ window_length).
//
// Reference: Rust Book §8 (Slices)

use crate::domain::record::FEATURE_COUNT;

/// One window of consecutive normalised feature vectors plus the
/// encoded label of the row that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceWindow {
    pub steps: Vec<[f32; FEATURE_COUNT]>,
    pub label: usize,
}

/// Build every window over `features`/`labels` (same length, same order).
///
/// # Panics
/// Panics if `features` and `labels` differ in length or if
/// `window_length` is zero — both are caller bugs, not data problems.
pub fn create_windows(
    features:      &[[f32; FEATURE_COUNT]],
    labels:        &[usize],
    window_length: usize,
) -> Vec<SequenceWindow> {
    assert_eq!(
        features.len(),
        labels.len(),
        "features ({}) and labels ({}) must have the same length",
        features.len(),
        labels.len()
    );
    assert!(window_length > 0, "window_length must be at least 1");

    let count = features.len().saturating_sub(window_length);
    (0..count)
        .map(|i| SequenceWindow {
            steps: features[i..i + window_length].to_vec(),
            label: labels[i + window_length],
        })
        .collect()
}
