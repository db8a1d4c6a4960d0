// Output formatting for CLI

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use oggchapters::{format_timestamp, Chapter};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Aligned text
    Table,
}

/// One chapter as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterRecord {
    pub index: usize,
    pub start: String,
    pub start_ms: u64,
    pub name: Option<String>,
}

impl ChapterRecord {
    pub fn from_chapters(chapters: &[Chapter]) -> Vec<Self> {
        chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| ChapterRecord {
                index: i + 1,
                start: format_timestamp(chapter.start),
                start_ms: u64::try_from(chapter.start.as_millis()).unwrap_or(u64::MAX),
                name: chapter.name.clone(),
            })
            .collect()
    }
}

/// Chapters of one file
#[derive(Debug, Clone, Serialize)]
pub struct FileChapters {
    pub file: String,
    pub chapters: Vec<ChapterRecord>,
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Output the chapters of a file
    pub fn output_chapters(&self, record: &FileChapters, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                writeln!(writer, "{}", record.file)?;
                if record.chapters.is_empty() {
                    writeln!(writer, "  (no chapters)")?;
                }
                let width = record.chapters.len().to_string().len();
                for chapter in &record.chapters {
                    writeln!(
                        writer,
                        "  {:>width$}  {}  {}",
                        chapter.index,
                        chapter.start,
                        chapter.name.as_deref().unwrap_or(""),
                        width = width
                    )?;
                }
                Ok(())
            }
            _ => self.output_value(record, writer),
        }
    }

    /// Output any serializable record
    pub fn output_value<T: Serialize>(&self, value: &T, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(value)?)?;
            }
            OutputFormat::Table => {
                self.output_table(&serde_json::to_value(value)?, writer)?;
            }
        }
        Ok(())
    }

    /// Output as table
    fn output_table(&self, value: &serde_json::Value, writer: &mut impl Write) -> Result<()> {
        if let Some(obj) = value.as_object() {
            let max_key_len = obj.keys().map(|k| k.len()).max().unwrap_or(0);

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;

            for (key, value) in obj {
                writeln!(
                    writer,
                    "{:<width$}{}",
                    format!("{}:", key),
                    self.format_value(value),
                    width = max_key_len + 2
                )?;
            }

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        }
        Ok(())
    }

    /// Format a JSON value for display
    fn format_value(&self, value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "(null)".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Array(arr) => {
                if arr.is_empty() {
                    "[]".to_string()
                } else {
                    arr.iter()
                        .map(|item| match item {
                            serde_json::Value::Object(_) => item.to_string(),
                            _ => self.format_value(item),
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            }
            serde_json::Value::Object(obj) => {
                if obj.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{{} items}}", obj.len())
                }
            }
        }
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            eprintln!("  {}", message);
        }
    }
}
