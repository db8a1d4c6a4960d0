// CLI binary entry point for oggchapters

use std::io;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[cfg(test)]
use oggchapters::ogg::crc;
#[cfg(test)]
#[path = "../tests/common/fixtures.rs"]
mod fixtures;

use cli::commands::{command_batch, command_detect, command_info, command_read};
use cli::{Commands, Config, OutputFormatter};

fn main() {
    let config = Config::parse();
    init_logging(&config);

    if let Err(e) = run(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Route library log records to stderr; RUST_LOG overrides the CLI flags
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: &Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);
    let options = config.reader_options();

    match &config.command {
        Commands::Read { files, output } => {
            command_read(files, output.as_deref(), options, &formatter)
        }
        Commands::Detect { files } => command_detect(files, options, &formatter),
        Commands::Info { files } => command_info(files, options, &formatter),
        Commands::Batch { directory, pattern } => {
            command_batch(directory, pattern, options, &formatter, &mut io::stdout())
        }
    }
}
