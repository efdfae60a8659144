//! vecadd command-line interface.
//!
//! Runs the OpenCL vector-add offload pipeline and lists the available
//! compute devices. Diagnostics go to stderr through `tracing`; the
//! measurement summary lines stay on stdout.

use clap::{Parser, Subcommand};
use tracing::error;

mod commands;

use commands::RunCommand;

/// OpenCL vector-add offload demo
#[derive(Parser)]
#[command(name = "vecadd")]
#[command(about = "OpenCL vector-add offload demo with timing and verification")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full offload pipeline
    Run(RunCommand),

    /// List OpenCL platforms and devices
    #[command(alias = "list")]
    Devices,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Run(cmd) => cmd.execute(),
        Commands::Devices => commands::devices::execute(),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);

        let mut source = e.source();
        while let Some(err) = source {
            error!("  Caused by: {}", err);
            source = err.source();
        }

        std::process::exit(1);
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--log-level`;
/// everything is written to stderr so stdout stays machine-readable.
fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
