mod args;

use anyhow::Context;
use clap::Parser;
use passcheck_ai::ModelGateway;
use passcheck_core::{FeatureVector, PredictionResult};
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    tracing::info!("passcheck v{}", env!("CARGO_PKG_VERSION"));

    // A missing or corrupt model is fatal: nothing is bound until this succeeds.
    let model_path = cli.model_path();
    let gateway = ModelGateway::initialize(&model_path)
        .with_context(|| format!("loading model from {}", model_path.display()))?;

    match cli.command {
        None | Some(Command::Serve) => passcheck_server::serve(&cli.server_config(), gateway).await,
        Some(Command::Predict {
            study_hours,
            previous_score,
        }) => predict_once(&gateway, study_hours, previous_score),
    }
}

/// `RUST_LOG` wins; otherwise debug mode picks the level. Logs go to stderr
/// so `predict` output stays clean on stdout.
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn predict_once(gateway: &ModelGateway, study_hours: f64, previous_score: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        study_hours.is_finite() && previous_score.is_finite(),
        "features must be finite numbers"
    );
    let prediction = gateway.predict(&FeatureVector::new(study_hours, previous_score))?;
    let result = PredictionResult::from_prediction(&prediction)
        .context("predicted class has no probability")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
