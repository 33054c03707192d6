use burn::data::dataset::Dataset;

use crate::data::windowing::SequenceWindow;
use crate::domain::record::FEATURE_COUNT;

/// One training example: a window of normalised feature vectors,
/// the class code of the next step, and its one-hot target.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSample {
    pub window: Vec<[f32; FEATURE_COUNT]>,
    pub label:  usize,
    pub target: Vec<f32>,
}

impl WindowSample {
    pub fn new(win: SequenceWindow, target: Vec<f32>) -> Self {
        Self { window: win.steps, label: win.label, target }
    }
}

pub struct WindowDataset {
    samples: Vec<WindowSample>,
}

impl WindowDataset {
    pub fn new(samples: Vec<WindowSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<WindowSample> for WindowDataset {
    fn get(&self, index: usize) -> Option<WindowSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::one_hot::one_hot;

    #[test]
    fn test_sample_keeps_window_and_label() {
        let win = SequenceWindow { steps: vec![[0.5; FEATURE_COUNT]; 4], label: 1 };
        let s   = WindowSample::new(win, one_hot(1, 3).unwrap());
        assert_eq!(s.target, vec![0.0, 1.0, 0.0]);
        assert_eq!(s.window.len(), 4);
        assert_eq!(s.label, 1);
    }

    #[test]
    fn test_dataset_get_and_len() {
        let win = SequenceWindow { steps: vec![[0.0; FEATURE_COUNT]; 2], label: 2 };
        let ds  = WindowDataset::new(vec![WindowSample::new(win, one_hot(2, 3).unwrap())]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get(0).map(|s| s.label), Some(2));
        assert!(ds.get(1).is_none());
    }
}
