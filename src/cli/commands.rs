// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   - train   → the full pipeline, ending with a persisted model
//   - prepare → load/clean/window/split only, then report
//
// Every default reproduces the reference training run.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the landslide risk classifier and save it
    Train(TrainArgs),

    /// Load and preprocess the dataset, report the result, do not train
    Prepare(DataArgs),
}

/// Numerical backend that runs the training loop.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU via ndarray
    #[default]
    Ndarray,
    /// GPU via wgpu
    Wgpu,
}

/// Arguments shared by every subcommand: where the data is and how
/// it is windowed and split.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// CSV file with 6 columns: temperature, humidity, precipitation,
    /// soil_moisture, elevation, risk (header row optional)
    #[arg(long, default_value = "regenerated_landslide_risk_dataset.csv")]
    pub dataset: String,

    /// Number of consecutive rows in each input window
    #[arg(long, default_value_t = 10)]
    pub window_length: usize,

    /// Fraction of windows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the train/test shuffle, weight init and batch order
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output path for the model; `.mpk.gz` (weights) and `.json`
    /// (metadata) are written next to it
    #[arg(long, default_value = "landslide_multiclass_model")]
    pub output: String,

    /// Number of full passes through the training subset
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Samples per gradient step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    #[arg(long, value_enum, default_value_t = BackendKind::Ndarray)]
    pub backend: BackendKind,
}

impl From<DataArgs> for TrainConfig {
    fn from(a: DataArgs) -> Self {
        TrainConfig {
            dataset_path:  a.dataset,
            window_length: a.window_length,
            test_fraction: a.test_fraction,
            seed:          a.seed,
            ..TrainConfig::default()
        }
    }
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            output_path:   a.output,
            epochs:        a.epochs,
            batch_size:    a.batch_size,
            learning_rate: a.lr,
            ..TrainConfig::from(a.data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_defaults_match_reference_run() {
        let cli = Cli::try_parse_from(["landslide-risk", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert_eq!(args.backend, BackendKind::Ndarray);

        let cfg: TrainConfig = args.into();
        let def = TrainConfig::default();
        assert_eq!(cfg.dataset_path, def.dataset_path);
        assert_eq!(cfg.output_path, def.output_path);
        assert_eq!(cfg.window_length, 10);
        assert_eq!(cfg.epochs, 50);
        assert_eq!(cfg.batch_size, 32);
        assert_eq!(cfg.test_fraction, 0.2);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.learning_rate, 1e-3);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "landslide-risk", "train",
            "--dataset", "d.csv", "--window-length", "5", "--epochs", "3",
            "--backend", "wgpu",
        ])
        .unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert_eq!(args.backend, BackendKind::Wgpu);
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.dataset_path, "d.csv");
        assert_eq!(cfg.window_length, 5);
        assert_eq!(cfg.epochs, 3);
    }

    #[test]
    fn test_prepare_takes_data_args_only() {
        let cli = Cli::try_parse_from(["landslide-risk", "prepare", "--seed", "7"]).unwrap();
        let Commands::Prepare(args) = cli.command else { panic!("expected prepare") };
        assert_eq!(TrainConfig::from(args).seed, 7);
        assert!(Cli::try_parse_from(["landslide-risk", "prepare", "--epochs", "3"]).is_err());
    }
}
