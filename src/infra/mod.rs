// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to the data or ML
// layers:
//
//   model_store.rs — writes the trained weights with Burn's
//                    CompactRecorder plus a JSON side file with
//                    the architecture, label mapping and scaler
//                    statistics
//
//   metrics.rs     — per-epoch loss/accuracy records and the
//                    training history returned to the caller
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model weights + metadata persistence
pub mod model_store;

/// Epoch metrics and training history
pub mod metrics;
