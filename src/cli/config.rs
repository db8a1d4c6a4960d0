// CLI configuration
use clap::{Parser, Subcommand};
use oggchapters::ReaderOptions;

use crate::cli::output::OutputFormat;

/// oggchapters - chapter markers from OGG Vorbis and Opus files
#[derive(Parser, Debug)]
#[command(name = "oggchapters")]
#[command(about = "Read chapter markers from OGG Vorbis and OGG Opus files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages and warnings)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (log decoding details)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Reject pages with a bad CRC
    #[arg(long, global = true)]
    pub verify_crc: bool,

    /// Fail on pages that break packet continuation instead of resyncing
    #[arg(long, global = true)]
    pub strict: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read chapters from audio file(s)
    Read {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the logical streams of audio file(s)
    Detect {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Show file information
    Info {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Read chapters from every matching file in a directory
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: String,

        /// File pattern (e.g., "*.opus", "*.ogg")
        #[arg(short, long)]
        pattern: String,
    },
}

impl Config {
    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions::new()
            .verify_checksums(self.verify_crc)
            .strict(self.strict)
    }

    /// Default log filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
