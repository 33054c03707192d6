// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Runs the training pipeline in two halves.
//
// prepare():
//   Step 1: Load the CSV                    (Layer 4 - data)
//   Step 2: Filter + encode risk labels     (Layer 4 - data)
//   Step 3: Min-max scale features          (Layer 4 - data)
//   Step 4: Build sliding windows           (Layer 4 - data)
//   Step 5: One-hot encode targets          (Layer 4 - data)
//   Step 6: Seeded train/test split         (Layer 4 - data)
//
// train():
//   Step 7: Build the model                 (Layer 5 - ml)
//   Step 8: Run the training loop           (Layer 5 - ml)
//   Step 9: Persist weights + metadata      (Layer 6 - infra)
//
// The CLI calls prepare() first so it can print the label set and
// the realised label→code mapping before any training starts.
//
// The scaler and the label encoder are fitted on the whole filtered
// dataset BEFORE the split, so test rows contribute to the scaling
// statistics. That reproduces the reference experiments.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{Context, Result};
use burn::tensor::backend::AutodiffBackend;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{WindowDataset, WindowSample},
    label_encoder::{distinct_labels, filter_valid_risks, LabelEncoder},
    loader::CsvLoader,
    normalizer::MinMaxScaler,
    one_hot::one_hot_encode,
    splitter::split_train_test,
    windowing::create_windows,
};
use crate::domain::{
    error::PipelineError,
    record::{FEATURE_COUNT, NUM_CLASSES},
    traits::RecordSource,
};
use crate::infra::{
    metrics::TrainingHistory,
    model_store::{ModelMetadata, ModelStore, SavedModel},
};
use crate::ml::{model::RiskLstmConfig, trainer::run_training};

// ─── Training Configuration ──────────────────────────────────────────────────
// All parameters of one run. Defaults reproduce the reference experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset_path:  String,
    pub output_path:   String,
    pub window_length: usize,
    pub epochs:        usize,
    pub batch_size:    usize,
    pub test_fraction: f64,
    pub seed:          u64,
    pub learning_rate: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path:  "regenerated_landslide_risk_dataset.csv".to_string(),
            output_path:   "landslide_multiclass_model".to_string(),
            window_length: 10,
            epochs:        50,
            batch_size:    32,
            test_fraction: 0.2,
            seed:          42,
            learning_rate: 1e-3,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |msg: String| Err(PipelineError::InvalidConfig(msg));
        if self.window_length == 0 {
            return invalid("window length must be at least 1".into());
        }
        if self.epochs == 0 {
            return invalid("epochs must be at least 1".into());
        }
        if self.batch_size == 0 {
            return invalid("batch size must be at least 1".into());
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return invalid(format!("test fraction {} is not in (0, 1)", self.test_fraction));
        }
        if !(self.learning_rate > 0.0) {
            return invalid(format!("learning rate {} must be positive", self.learning_rate));
        }
        Ok(())
    }
}

// ─── Prepared Data ────────────────────────────────────────────────────────────
/// Output of steps 1–6: everything training needs, plus what the
/// CLI reports before training starts.
#[derive(Debug)]
pub struct PreparedData {
    /// Distinct risk labels before filtering, first-seen order
    pub raw_labels:    Vec<String>,
    pub rows_loaded:   usize,
    pub rows_kept:     usize,
    pub label_encoder: LabelEncoder,
    pub scaler:        MinMaxScaler,
    pub train:         Vec<WindowSample>,
    pub test:          Vec<WindowSample>,
}

impl PreparedData {
    pub fn sample_count(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

/// What a finished run hands back.
#[derive(Debug)]
pub struct TrainReport {
    pub history: TrainingHistory,
    pub saved:   SavedModel,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Steps 1–6 on the configured CSV file.
    pub fn prepare(&self) -> Result<PreparedData, PipelineError> {
        self.prepare_from(&CsvLoader::new(&self.config.dataset_path))
    }

    /// Steps 1–6 on any record source.
    pub fn prepare_from(&self, source: &impl RecordSource) -> Result<PreparedData, PipelineError> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load rows ─────────────────────────────────────────────────
        let records     = source.load_all()?;
        let rows_loaded = records.len();
        let raw_labels  = distinct_labels(&records);

        // ── Step 2: Keep valid labels, fit the encoder ────────────────────────
        let records = filter_valid_risks(records)?;
        let rows_kept = records.len();
        tracing::info!("Kept {} of {} rows after label filtering", rows_kept, rows_loaded);

        let label_encoder = LabelEncoder::fit(records.iter().map(|r| r.risk.as_str()))?;
        let codes         = label_encoder.encode_records(&records)?;
        tracing::info!("Label mapping: {:?}", label_encoder.mapping());

        // ── Step 3: Scale features on the full filtered table ─────────────────
        let raw_features: Vec<[f64; FEATURE_COUNT]> = records.iter().map(|r| r.features()).collect();
        let (scaler, features) = MinMaxScaler::fit_transform(&raw_features)?;

        // ── Step 4: Sliding windows ───────────────────────────────────────────
        if rows_kept <= cfg.window_length {
            return Err(PipelineError::NotEnoughRows {
                rows:          rows_kept,
                window_length: cfg.window_length,
            });
        }
        let windows = create_windows(&features, &codes, cfg.window_length);
        tracing::info!(
            "Built {} windows of length {}",
            windows.len(),
            cfg.window_length
        );

        // ── Step 5: One-hot targets ───────────────────────────────────────────
        let labels: Vec<usize> = windows.iter().map(|w| w.label).collect();
        let targets = one_hot_encode(&labels, NUM_CLASSES)?;
        let samples: Vec<WindowSample> = windows
            .into_iter()
            .zip(targets)
            .map(|(w, t)| WindowSample::new(w, t))
            .collect();

        // ── Step 6: Train / test split ────────────────────────────────────────
        let (train, test) = split_train_test(samples, cfg.test_fraction, cfg.seed)?;
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        Ok(PreparedData {
            raw_labels,
            rows_loaded,
            rows_kept,
            label_encoder,
            scaler,
            train,
            test,
        })
    }

    /// Steps 7–9: train on prepared data and persist the result.
    /// Nothing is written unless training finishes.
    pub fn train<B: AutodiffBackend>(
        &self,
        prepared: PreparedData,
        device:   B::Device,
    ) -> Result<TrainReport> {
        let cfg       = &self.config;
        let model_cfg = RiskLstmConfig::new();

        // ── Steps 7 + 8: Build and train the model (Layer 5) ──────────────────
        let (model, history) = run_training::<B>(
            cfg,
            &model_cfg,
            WindowDataset::new(prepared.train),
            WindowDataset::new(prepared.test),
            device,
        )?;

        // ── Step 9: Persist ───────────────────────────────────────────────────
        let metadata = ModelMetadata::new(
            model_cfg,
            cfg.window_length,
            &prepared.label_encoder,
            &prepared.scaler,
        );
        let saved = ModelStore::new(&cfg.output_path)
            .save(&model, &metadata)
            .with_context(|| format!("Persisting model to '{}' failed", cfg.output_path))?;

        Ok(TrainReport { history, saved })
    }
}
