//! Hrimfax Command-Line Interface
//!
//! Circuit templates, backend orchestration, and local simulation from
//! one binary.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::run::CircuitKind;
use commands::{backends, run};

/// Hrimfax - quantum circuit construction and backend orchestration
#[derive(Parser)]
#[command(name = "hrimfax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered backends
    ListBackends,

    /// Build a template circuit and run it on a backend
    Run {
        /// Circuit template
        #[arg(short, long, value_enum)]
        circuit: CircuitKind,

        /// Backend to run on
        #[arg(short, long, default_value = "aer_simulator")]
        backend: String,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: i64,

        /// Register size for size-parameterized templates (ghz, qft)
        #[arg(short, long, default_value = "3")]
        qubits: u32,

        /// Optimization level (0-2)
        #[arg(long, default_value = "1")]
        optimization_level: u8,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::ListBackends => backends::execute().await,

        Commands::Run {
            circuit,
            backend,
            shots,
            qubits,
            optimization_level,
        } => run::execute(circuit, &backend, shots, qubits, optimization_level).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
