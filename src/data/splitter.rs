// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles the windowed samples with a SEEDED generator and cuts
// them into a training subset and a held-out test subset.
//
// Sizing follows scikit-learn's train_test_split:
//   test  = ceil(total × test_fraction)
//   train = total - test
//
// The split is shuffled but not stratified, so class balance in
// the test subset is whatever the shuffle produces. The same seed
// and the same input always give the same partition.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::error::PipelineError;

/// Shuffle `samples` with `seed` and split into (train, test).
///
/// Fails with `EmptySplit` when either side would be empty.
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> Result<(Vec<T>, Vec<T>), PipelineError> {
    let total      = samples.len();
    let test_count = ((total as f64) * test_fraction).ceil() as usize;

    if test_count == 0 || test_count >= total {
        return Err(PipelineError::EmptySplit { samples: total, test_fraction });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let test = samples.split_off(total - test_count);

    tracing::debug!(
        "Dataset split: {} train, {} test (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    Ok((samples, test))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_test_size_rounds_up() {
        let items: Vec<usize> = (0..27).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(test.len(),  6);
        assert_eq!(train.len(), 21);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 0.3, 7).unwrap();
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = split_train_test((0..40).collect::<Vec<usize>>(), 0.2, 42).unwrap();
        let b = split_train_test((0..40).collect::<Vec<usize>>(), 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_is_shuffled() {
        let (train, _) = split_train_test((0..100).collect::<Vec<usize>>(), 0.2, 42).unwrap();
        assert_ne!(train, (0..80).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_or_tiny_input_is_rejected() {
        assert!(matches!(
            split_train_test(Vec::<usize>::new(), 0.2, 42),
            Err(PipelineError::EmptySplit { samples: 0, .. })
        ));
        // one sample → test takes it all, nothing left to train on
        assert!(split_train_test(vec![1usize], 0.2, 42).is_err());
    }
}
