mod generate;

use clap::{Parser, Subcommand};
use eyre::Result;
use generate::GenerateCommand;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hpkl")]
#[command(version)]
#[command(about = "Generate Java and Kotlin configuration classes from Pkl module schemas")]
pub(crate) struct Cli {
    /// Log generator decisions (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate source files from schema documents
    Generate(GenerateCommand),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
