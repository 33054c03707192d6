// ============================================================
// Layer 4 — Window Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<WindowSample>
// into tensors the model can consume.
//
// How batching works here:
//   Input:  N WindowSamples, each W steps × 5 features
//   Output: windows [N, W, 5] and targets [N, 3]
//
//   All feature values are flattened into one Vec in
//   sample → step → feature order, then reshaped:
//   [s1_t1_f1, ..., s1_t1_f5, s1_t2_f1, ..., sN_tW_f5] → [N, W, 5]
//
// Every window in a run has the same length, so no padding is needed.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::WindowSample;
use crate::domain::record::FEATURE_COUNT;

/// A batch of windows ready for the forward pass.
#[derive(Debug, Clone)]
pub struct WindowBatch<B: Backend> {
    /// Feature windows — shape: [batch_size, window_length, FEATURE_COUNT]
    pub windows: Tensor<B, 3>,

    /// One-hot targets — shape: [batch_size, num_classes]
    pub targets: Tensor<B, 2>,
}

/// Holds the target device so tensors are created on the right CPU/GPU.
#[derive(Clone, Debug)]
pub struct WindowBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> WindowBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<B, WindowSample, WindowBatch<B>> for WindowBatcher<B> {
    fn batch(&self, items: Vec<WindowSample>, _device: &B::Device) -> WindowBatch<B> {
        let batch_size  = items.len();
        let window_len  = items[0].window.len();
        let num_classes = items[0].target.len();

        let window_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.window.iter().flat_map(|step| step.iter().copied()))
            .collect();

        let target_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.target.iter().copied())
            .collect();

        let windows = Tensor::<B, 1>::from_floats(window_flat.as_slice(), &self.device)
            .reshape([batch_size, window_len, FEATURE_COUNT]);

        let targets = Tensor::<B, 1>::from_floats(target_flat.as_slice(), &self.device)
            .reshape([batch_size, num_classes]);

        WindowBatch { windows, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{one_hot::one_hot, windowing::SequenceWindow};

    type TestBackend = burn::backend::NdArray;

    fn sample(value: f32, label: usize) -> WindowSample {
        let steps = (0..4).map(|t| [value + t as f32; FEATURE_COUNT]).collect();
        WindowSample::new(SequenceWindow { steps, label }, one_hot(label, 3).unwrap())
    }

    #[test]
    fn test_batch_shapes() {
        let batcher = WindowBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![sample(0.0, 0), sample(10.0, 2)], &Default::default());
        assert_eq!(batch.windows.dims(), [2, 4, FEATURE_COUNT]);
        assert_eq!(batch.targets.dims(), [2, 3]);
    }

    #[test]
    fn test_batch_preserves_sample_and_step_order() {
        let batcher = WindowBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![sample(0.0, 1), sample(10.0, 2)], &Default::default());

        let windows: Vec<f32> = batch.windows.into_data().to_vec().unwrap();
        // sample 1, step 2, feature 0
        assert_eq!(windows[FEATURE_COUNT * 4 + FEATURE_COUNT * 2], 12.0);

        let targets: Vec<f32> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(targets, vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
