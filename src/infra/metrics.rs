// ============================================================
// Layer 6 — Training Metrics
// ============================================================
// Per-epoch loss/accuracy for the training pass and for the
// held-out test subset, plus the full history of a run.
//
// How to read the metrics:
//   - loss should decrease each epoch (model is learning)
//   - val_loss rising while loss keeps falling → overfitting
//   - accuracy is the fraction of windows whose arg-max
//     prediction matches the next-step risk class

use std::fmt;

use serde::{Deserialize, Serialize};

/// Metrics for a single training epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean categorical cross-entropy over the training samples
    pub train_loss: f64,

    /// Fraction of training samples predicted correctly, in [0, 1]
    pub train_accuracy: f64,

    /// Mean categorical cross-entropy over the test subset
    pub val_loss: f64,

    /// Fraction of test samples predicted correctly, in [0, 1]
    pub val_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:          usize,
        train_loss:     f64,
        train_accuracy: f64,
        val_loss:       f64,
        val_accuracy:   f64,
    ) -> Self {
        Self { epoch, train_loss, train_accuracy, val_loss, val_accuracy }
    }
}

impl fmt::Display for EpochMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loss={:.4} | accuracy={:.4} | val_loss={:.4} | val_accuracy={:.4}",
            self.train_loss, self.train_accuracy, self.val_loss, self.val_accuracy,
        )
    }
}

/// Every epoch's metrics, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingHistory {
    epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn push(&mut self, m: EpochMetrics) {
        self.epochs.push(m);
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpochMetrics> {
        self.epochs.iter()
    }

    /// Metrics of the final epoch — the weights that get persisted.
    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    /// Epoch with the lowest validation loss (reported only; the
    /// persisted weights are always the last epoch's).
    pub fn best_val_loss(&self) -> Option<&EpochMetrics> {
        self.iter()
            .filter(|m| !m.val_loss.is_nan())
            .min_by(|a, b| a.val_loss.total_cmp(&b.val_loss))
    }
}
