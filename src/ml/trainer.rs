// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + evaluate loop using Burn's DataLoader and Adam.
//
//   - Training runs on an AutodiffBackend B for gradients
//   - model.valid() returns the model on B::InnerBackend, with
//     dropout switched off, for evaluation on the test subset
//   - The evaluation batcher must also use B::InnerBackend
//   - No early stopping: the weights after the last epoch are
//     the ones handed back to the caller
//
// Adam uses the Keras defaults (lr 1e-3, β1 0.9, β2 0.999, ε 1e-7).
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::WindowBatcher, dataset::WindowDataset};
use crate::infra::metrics::{EpochMetrics, TrainingHistory};
use crate::ml::model::{
    categorical_cross_entropy, correct_predictions, RiskLstmConfig, RiskLstmModel,
};

pub fn run_training<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    model_cfg:     &RiskLstmConfig,
    train_dataset: WindowDataset,
    test_dataset:  WindowDataset,
    device:        B::Device,
) -> Result<(RiskLstmModel<B>, TrainingHistory)> {
    tracing::info!("Using device: {:?}", device);

    // Seed weight initialisation so repeated runs start identically
    B::seed(&device, cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: RiskLstmModel<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: LSTM({}) → LSTM({}) → Dense({}) → Dense({})",
        model_cfg.lstm1_hidden,
        model_cfg.lstm2_hidden,
        model_cfg.dense_hidden,
        model_cfg.num_classes,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new()
        .with_beta_1(0.9)
        .with_beta_2(0.999)
        .with_epsilon(1e-7)
        .init();

    // ── Training data loader (reshuffled every epoch) ─────────────────────────
    let train_samples = train_dataset.sample_count();
    let train_loader  = DataLoaderBuilder::new(WindowBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .build(train_dataset);

    // ── Test data loader (InnerBackend — no autodiff overhead) ────────────────
    let test_loader = DataLoaderBuilder::new(WindowBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .build(test_dataset);

    tracing::info!(
        "Training on {} samples for {} epochs (batch size {})",
        train_samples, cfg.epochs, cfg.batch_size,
    );

    let mut history = TrainingHistory::default();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_correct  = 0usize;
        let mut train_seen     = 0usize;

        for batch in train_loader.iter() {
            let batch_size = batch.targets.dims()[0];
            let (loss, logits) = model.forward_loss(batch.windows, batch.targets.clone());

            // Loss is a batch mean; weight it back up so the epoch
            // figure is a per-sample mean even with a short last batch.
            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val * batch_size as f64;
            train_correct  += correct_predictions(logits.detach(), batch.targets);
            train_seen     += batch_size;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        // ── Evaluation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut test_loss_sum = 0.0f64;
        let mut test_correct  = 0usize;
        let mut test_seen     = 0usize;

        for batch in test_loader.iter() {
            let batch_size = batch.targets.dims()[0];
            let logits     = model_valid.forward(batch.windows);

            let batch_loss: f64 = categorical_cross_entropy(logits.clone(), batch.targets.clone())
                .into_scalar()
                .elem::<f64>();
            test_loss_sum += batch_loss * batch_size as f64;
            test_correct  += correct_predictions(logits, batch.targets);
            test_seen     += batch_size;
        }

        let metrics = EpochMetrics::new(
            epoch,
            mean(train_loss_sum, train_seen),
            ratio(train_correct, train_seen),
            mean(test_loss_sum, test_seen),
            ratio(test_correct, test_seen),
        );

        println!("Epoch {:>3}/{} | {}", epoch, cfg.epochs, metrics);
        tracing::debug!(?metrics, "epoch finished");
        history.push(metrics);
    }

    tracing::info!("Training complete after {} epochs", cfg.epochs);
    Ok((model, history))
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { f64::NAN }
}

fn ratio(hits: usize, count: usize) -> f64 {
    if count > 0 { hits as f64 / count as f64 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{dataset::WindowSample, one_hot::one_hot, windowing::SequenceWindow};
    use crate::domain::record::FEATURE_COUNT;

    type TestBackend = burn::backend::Autodiff<burn::backend::NdArray>;

    fn samples(n: usize) -> Vec<WindowSample> {
        (0..n)
            .map(|i| {
                let label = i % 3;
                let steps = vec![[label as f32 / 2.0; FEATURE_COUNT]; 3];
                WindowSample::new(SequenceWindow { steps, label }, one_hot(label, 3).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_history_has_one_entry_per_epoch() {
        let cfg = TrainConfig { epochs: 2, batch_size: 4, ..TrainConfig::default() };
        let model_cfg = RiskLstmConfig::new()
            .with_lstm1_hidden(8)
            .with_lstm2_hidden(4)
            .with_dense_hidden(4);

        let (_, history) = run_training::<TestBackend>(
            &cfg,
            &model_cfg,
            WindowDataset::new(samples(10)),
            WindowDataset::new(samples(3)),
            Default::default(),
        )
        .unwrap();

        assert_eq!(history.len(), 2);
        for (i, m) in history.iter().enumerate() {
            assert_eq!(m.epoch, i + 1);
            assert!(m.train_loss.is_finite());
            assert!(m.val_loss.is_finite());
            assert!((0.0..=1.0).contains(&m.train_accuracy));
            assert!((0.0..=1.0).contains(&m.val_accuracy));
        }
    }
}
