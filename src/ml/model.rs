use burn::{
    nn::{
        Dropout, DropoutConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
        Relu,
    },
    prelude::*,
    tensor::activation::log_softmax,
};

use crate::domain::record::{FEATURE_COUNT, NUM_CLASSES};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct RiskLstmConfig {
    #[config(default = "FEATURE_COUNT")]
    pub num_features: usize,
    #[config(default = 100)]
    pub lstm1_hidden: usize,
    #[config(default = 50)]
    pub lstm2_hidden: usize,
    #[config(default = 25)]
    pub dense_hidden: usize,
    #[config(default = "NUM_CLASSES")]
    pub num_classes:  usize,
    #[config(default = 0.2)]
    pub dropout:      f64,
}

impl RiskLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> RiskLstmModel<B> {
        RiskLstmModel {
            lstm1:      LstmConfig::new(self.num_features, self.lstm1_hidden, true).init(device),
            dropout1:   DropoutConfig::new(self.dropout).init(),
            lstm2:      LstmConfig::new(self.lstm1_hidden, self.lstm2_hidden, true).init(device),
            dropout2:   DropoutConfig::new(self.dropout).init(),
            dense:      LinearConfig::new(self.lstm2_hidden, self.dense_hidden).init(device),
            activation: Relu::new(),
            output:     LinearConfig::new(self.dense_hidden, self.num_classes).init(device),
        }
    }
}

/// LSTM(100, full sequence) → Dropout → LSTM(50, last step) → Dropout
/// → Dense(25, ReLU) → Dense(3).
///
/// `forward` returns logits; softmax over them gives the class
/// probabilities, and the loss works on log-softmax directly.
#[derive(Module, Debug)]
pub struct RiskLstmModel<B: Backend> {
    pub lstm1:      Lstm<B>,
    pub dropout1:   Dropout,
    pub lstm2:      Lstm<B>,
    pub dropout2:   Dropout,
    pub dense:      Linear<B>,
    pub activation: Relu,
    pub output:     Linear<B>,
}

impl<B: Backend> RiskLstmModel<B> {
    /// windows: [batch, window_len, num_features] → logits: [batch, num_classes]
    pub fn forward(&self, windows: Tensor<B, 3>) -> Tensor<B, 2> {
        let (sequence, _) = self.lstm1.forward(windows, None);
        let sequence = self.dropout1.forward(sequence);

        // Second LSTM only hands its final time step to the head.
        let (sequence, _) = self.lstm2.forward(sequence, None);
        let [batch_size, seq_len, hidden] = sequence.dims();
        let last = sequence
            .slice([0..batch_size, seq_len - 1..seq_len, 0..hidden])
            .reshape([batch_size, hidden]);
        let x = self.dropout2.forward(last);

        let x = self.activation.forward(self.dense.forward(x));
        self.output.forward(x)
    }

    /// Categorical cross-entropy against one-hot targets.
    /// Returns (loss [1], logits [batch, num_classes]).
    pub fn forward_loss(
        &self,
        windows: Tensor<B, 3>,
        targets: Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(windows);
        let loss   = categorical_cross_entropy(logits.clone(), targets);
        (loss, logits)
    }
}

/// mean over the batch of  -Σ_c target_c · log softmax(logits)_c
pub fn categorical_cross_entropy<B: Backend>(
    logits:  Tensor<B, 2>,
    targets: Tensor<B, 2>,
) -> Tensor<B, 1> {
    (targets * log_softmax(logits, 1))
        .sum_dim(1)
        .mean()
        .neg()
}

/// Number of rows whose arg-max prediction matches the one-hot target.
pub fn correct_predictions<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 2>) -> usize {
    let hits: i64 = logits
        .argmax(1)
        .equal(targets.argmax(1))
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    hits as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::activation::softmax;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_default_architecture() {
        let cfg = RiskLstmConfig::new();
        assert_eq!(cfg.num_features, 5);
        assert_eq!(cfg.lstm1_hidden, 100);
        assert_eq!(cfg.lstm2_hidden, 50);
        assert_eq!(cfg.dense_hidden, 25);
        assert_eq!(cfg.num_classes, 3);
        assert_eq!(cfg.dropout, 0.2);
    }

    #[test]
    fn test_forward_shapes_and_probabilities() {
        let device = Default::default();
        let model: RiskLstmModel<TestBackend> = RiskLstmConfig::new().init(&device);
        let windows = Tensor::<TestBackend, 3>::ones([4, 10, FEATURE_COUNT], &device);

        let logits = model.forward(windows.clone());
        assert_eq!(logits.dims(), [4, NUM_CLASSES]);

        // softmax over the logits gives one probability per class
        let sums: Vec<f32> = softmax(model.forward(windows), 1)
            .sum_dim(1)
            .into_data()
            .to_vec()
            .unwrap();
        for s in sums {
            assert!((s - 1.0).abs() < 1e-5, "row sums to {s}");
        }
    }

    #[test]
    fn test_cross_entropy_of_uniform_logits_is_ln3() {
        let device  = Default::default();
        let logits  = Tensor::<TestBackend, 2>::zeros([2, 3], &device);
        let targets = Tensor::<TestBackend, 2>::from_floats(
            [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            &device,
        );
        let loss: f32 = categorical_cross_entropy(logits, targets).into_scalar().elem();
        assert!((loss - 3.0f32.ln()).abs() < 1e-5);
    }

    #[test]
    fn test_correct_predictions_counts_argmax_hits() {
        let device = Default::default();
        let logits = Tensor::<TestBackend, 2>::from_floats(
            [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]],
            &device,
        );
        let targets = Tensor::<TestBackend, 2>::from_floats(
            [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
            &device,
        );
        assert_eq!(correct_predictions(logits, targets), 2);
    }
}
