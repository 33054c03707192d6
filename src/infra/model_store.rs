// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists the trained model once, at the end of a run.
//
// What gets written for an output path like `landslide_multiclass_model`:
//
//   landslide_multiclass_model.mpk.gz  ← weights (CompactRecorder)
//   landslide_multiclass_model.json    ← architecture + preprocessing
//
// The JSON side file carries everything a downstream consumer needs
// to feed the weights correctly: the model config, the window
// length, the feature column order, the label classes in code order
// and the fitted scaler min/max.
//
// Both files are overwritten unconditionally. There is no
// versioning and no backup of an earlier model at the same path.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip
//   - Type-safe: loading fails if architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};

use crate::data::{label_encoder::LabelEncoder, normalizer::MinMaxScaler};
use crate::domain::record::{FEATURE_COUNT, FEATURE_NAMES};
use crate::ml::model::{RiskLstmConfig, RiskLstmModel};

/// Everything about a trained model except its weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model:         RiskLstmConfig,
    pub window_length: usize,
    pub feature_names: Vec<String>,
    /// Index = class code.
    pub label_classes: Vec<String>,
    pub feature_min:   [f64; FEATURE_COUNT],
    pub feature_max:   [f64; FEATURE_COUNT],
}

impl ModelMetadata {
    pub fn new(
        model:         RiskLstmConfig,
        window_length: usize,
        encoder:       &LabelEncoder,
        scaler:        &MinMaxScaler,
    ) -> Self {
        Self {
            model,
            window_length,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            label_classes: encoder.classes().to_vec(),
            feature_min:   scaler.data_min,
            feature_max:   scaler.data_max,
        }
    }
}

/// Where the artifacts of one run end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedModel {
    pub weights_path:  PathBuf,
    pub metadata_path: PathBuf,
}

pub struct ModelStore {
    /// Output path without extension; the recorder adds its own.
    base: PathBuf,
}

impl ModelStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn weights_path(&self) -> PathBuf {
        self.base.with_extension("mpk.gz")
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.base.with_extension("json")
    }

    /// Write the weights and the metadata side file.
    ///
    /// If the metadata cannot be written, the weights file written just
    /// before it is removed again so a failed save leaves nothing behind.
    pub fn save<B: Backend>(
        &self,
        model:    &RiskLstmModel<B>,
        metadata: &ModelMetadata,
    ) -> Result<SavedModel> {
        let weights_path = self.weights_path();
        CompactRecorder::new()
            .record(model.clone().into_record(), self.base.clone())
            .with_context(|| {
                format!("Failed to save model weights to '{}'", weights_path.display())
            })?;

        let metadata_path = self.metadata_path();
        let written = serde_json::to_string_pretty(metadata)
            .map_err(anyhow::Error::from)
            .and_then(|json| {
                fs::write(&metadata_path, json).with_context(|| {
                    format!("Cannot write model metadata to '{}'", metadata_path.display())
                })
            });
        if let Err(err) = written {
            if let Err(rm) = fs::remove_file(&weights_path) {
                tracing::warn!(
                    "Could not remove '{}' after failed save: {}",
                    weights_path.display(),
                    rm
                );
            }
            return Err(err);
        }

        tracing::debug!(
            "Saved weights to '{}' and metadata to '{}'",
            weights_path.display(),
            metadata_path.display()
        );
        Ok(SavedModel { weights_path, metadata_path })
    }
}
