//! Command-line and environment configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use passcheck_server::ServerConfig;

/// Artifact file name looked up next to the executable.
pub const MODEL_FILE: &str = "model.json";

#[derive(Debug, Parser)]
#[command(name = "passcheck", version, about = "Pass/fail classifier over HTTP")]
pub struct Cli {
    /// Model artifact (.json logistic weights or .onnx).
    /// Defaults to `model.json` beside the executable.
    #[arg(long, env = "PASSCHECK_MODEL", global = true)]
    pub model: Option<PathBuf>,

    #[arg(long, env = "PASSCHECK_HOST", default_value = "0.0.0.0", global = true)]
    pub host: IpAddr,

    #[arg(long, env = "PASSCHECK_PORT", default_value_t = 5000, global = true)]
    pub port: u16,

    /// Verbose logging and per-request traces.
    #[arg(
        long,
        env = "PASSCHECK_DEBUG",
        default_value_t = true,
        action = ArgAction::Set,
        global = true
    )]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve /predict and /health (the default).
    Serve,
    /// Classify one pair of features and print the result as JSON.
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        study_hours: f64,
        #[arg(long, allow_negative_numbers = true)]
        previous_score: f64,
    },
}

impl Cli {
    pub fn model_path(&self) -> PathBuf {
        self.model.clone().unwrap_or_else(default_model_path)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            debug: self.debug,
        }
    }
}

/// `model.json` in the executable's directory, or the working directory if
/// the executable path cannot be resolved.
fn default_model_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(MODEL_FILE)))
        .unwrap_or_else(|| PathBuf::from(MODEL_FILE))
}
