// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All model math lives here.
//
//   model.rs   — the stacked LSTM classifier:
//                • LSTM(100) returning the full sequence
//                • Dropout(0.2)
//                • LSTM(50) returning the final step only
//                • Dropout(0.2)
//                • Dense(25, ReLU)
//                • Dense(3) + softmax
//                plus categorical cross-entropy and accuracy helpers
//
//   trainer.rs — the training loop:
//                forward pass, loss, backward pass, Adam step,
//                then evaluation on the test subset every epoch
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Stacked LSTM risk classifier
pub mod model;

/// Training loop with per-epoch evaluation
pub mod trainer;
