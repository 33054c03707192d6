// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw CSV file to tensor batches:
//
//   dataset CSV
//       │
//       ▼
//   CsvLoader          → reads rows, canonical column names
//       │
//       ▼
//   label_encoder      → drops unknown risks, maps labels to codes
//       │
//       ▼
//   MinMaxScaler       → scales each feature column to [0, 1]
//       │
//       ▼
//   create_windows     → (window, next-step label) pairs
//       │
//       ▼
//   one_hot            → fixed-width targets
//       │
//       ▼
//   split_train_test   → seeded 80/20 partition
//       │
//       ▼
//   WindowDataset      → implements Burn's Dataset trait
//       │
//       ▼
//   WindowBatcher      → stacks samples into tensor batches
//
// Each module does one step and is tested on its own.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the sensor CSV file
pub mod loader;

/// Filters risk labels and encodes them as class codes
pub mod label_encoder;

/// Min-max feature scaling
pub mod normalizer;

/// Sliding windows over the ordered rows
pub mod windowing;

/// Class code → one-hot target vector
pub mod one_hot;

/// Seeded train/test split
pub mod splitter;

/// Implements Burn's Dataset trait for window samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
