// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and owns all console output:
//   - the distinct risk labels found before filtering
//   - the realised label → code mapping
//   - (per-epoch metrics are printed by the training loop)
//   - the final success message
//
// All pipeline work is delegated to Layer 2 (application).
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use burn::backend::{
    ndarray::NdArrayDevice,
    wgpu::WgpuDevice,
    Autodiff, NdArray, Wgpu,
};
use clap::Parser;
use commands::{BackendKind, Commands, DataArgs, TrainArgs};

use crate::application::train_use_case::{PreparedData, TrainUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "landslide-risk",
    version,
    about = "Train an LSTM classifier that predicts landslide risk (Low/Moderate/High) from sensor windows."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Prepare(args) => run_prepare(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    let backend  = args.backend;
    let use_case = TrainUseCase::new(args.into());
    tracing::info!("Starting training on '{}'", use_case.config().dataset_path);

    let prepared = use_case.prepare()?;
    print_dataset_summary(&prepared);

    let report = match backend {
        BackendKind::Ndarray => {
            use_case.train::<Autodiff<NdArray>>(prepared, NdArrayDevice::Cpu)?
        }
        BackendKind::Wgpu => {
            use_case.train::<Autodiff<Wgpu>>(prepared, WgpuDevice::default())?
        }
    };

    if let Some(last) = report.history.last() {
        tracing::info!("Final metrics after {} epochs: {}", report.history.len(), last);
    }
    if let Some(best) = report.history.best_val_loss() {
        tracing::info!("Lowest val_loss {:.4} at epoch {}", best.val_loss, best.epoch);
    }
    println!(
        "Multi-class landslide risk model trained and saved to '{}' (metadata: '{}')",
        report.saved.weights_path.display(),
        report.saved.metadata_path.display(),
    );
    Ok(())
}

fn run_prepare(args: DataArgs) -> Result<()> {
    let use_case = TrainUseCase::new(args.into());
    let prepared = use_case.prepare()?;
    print_dataset_summary(&prepared);
    println!(
        "{} rows loaded, {} kept, {} windows ({} train / {} test)",
        prepared.rows_loaded,
        prepared.rows_kept,
        prepared.sample_count(),
        prepared.train.len(),
        prepared.test.len(),
    );
    Ok(())
}

fn print_dataset_summary(prepared: &PreparedData) {
    println!("Unique risk labels before filtering: {:?}", prepared.raw_labels);
    let mapping = prepared
        .label_encoder
        .mapping()
        .iter()
        .map(|(label, code)| format!("{label}={code}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Encoded classes mapping: {{{mapping}}}");
}
