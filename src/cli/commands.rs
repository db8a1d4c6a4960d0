// CLI command implementations
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use glob::glob;
use oggchapters::{probe, ChapterReader, Codec, ReaderOptions, StreamSummary};
use serde::Serialize;

use crate::cli::output::{ChapterRecord, FileChapters, OutputFormat, OutputFormatter};

/// Read chapters from files
pub fn command_read(
    files: &[String],
    output: Option<&str>,
    options: ReaderOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    if files.is_empty() {
        bail!("No files specified");
    }

    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Cannot create {}", path))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };

    let reader = ChapterReader::new(options);
    for file_path in files {
        if !Path::new(file_path).exists() {
            formatter.print_error(&format!("File not found: {}", file_path));
            continue;
        }

        let chapters = reader.read_path(file_path);
        let record = FileChapters {
            file: file_path.clone(),
            chapters: ChapterRecord::from_chapters(&chapters),
        };
        formatter.output_chapters(&record, &mut writer)?;
    }

    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct DetectRecord {
    file: String,
    streams: Vec<StreamSummary>,
    selected: Option<u32>,
    error: Option<String>,
}

/// List logical streams and their codecs
pub fn command_detect(
    files: &[String],
    options: ReaderOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    if files.is_empty() {
        bail!("No files specified");
    }

    let mut stdout = io::stdout();
    for file_path in files {
        let file = match File::open(file_path) {
            Ok(file) => file,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", file_path, e));
                continue;
            }
        };

        let record = match probe(BufReader::new(file), &options) {
            Ok(probe) => DetectRecord {
                file: file_path.clone(),
                streams: probe.streams,
                selected: probe.selected,
                error: None,
            },
            Err(e) => DetectRecord {
                file: file_path.clone(),
                streams: Vec::new(),
                selected: None,
                error: Some(e.to_string()),
            },
        };

        if formatter.format() == OutputFormat::Table {
            write_detect_table(&record, &mut stdout)?;
        } else {
            formatter.output_value(&record, &mut stdout)?;
        }
    }

    Ok(())
}

fn write_detect_table(record: &DetectRecord, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "{}", record.file)?;
    if let Some(error) = &record.error {
        writeln!(writer, "  error: {}", error)?;
        return Ok(());
    }
    for stream in &record.streams {
        let marker = if record.selected == Some(stream.serial) { "*" } else { " " };
        writeln!(
            writer,
            " {} {:#010x}  {:<8} {:>6} pages {:>6} packets",
            marker, stream.serial, stream.codec, stream.pages, stream.packets
        )?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct InfoRecord {
    file: String,
    size: u64,
    modified: Option<String>,
    codec: Option<Codec>,
    vendor: Option<String>,
    comments: usize,
    chapters: usize,
    error: Option<String>,
}

/// Show file information
pub fn command_info(
    files: &[String],
    options: ReaderOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    if files.is_empty() {
        bail!("No files specified");
    }

    let mut stdout = io::stdout();
    for file_path in files {
        match info_record(file_path, &options) {
            Ok(record) => formatter.output_value(&record, &mut stdout)?,
            Err(e) => formatter.print_error(&format!("{}: {:#}", file_path, e)),
        }
    }

    Ok(())
}

fn info_record(file_path: &str, options: &ReaderOptions) -> Result<InfoRecord> {
    let metadata = fs::metadata(file_path).with_context(|| format!("Cannot stat {}", file_path))?;
    let modified = metadata
        .modified()
        .ok()
        .map(|time| DateTime::<Local>::from(time).to_rfc3339());

    let file = File::open(file_path).with_context(|| format!("Cannot open {}", file_path))?;
    let mut record = InfoRecord {
        file: file_path.to_string(),
        size: metadata.len(),
        modified,
        codec: None,
        vendor: None,
        comments: 0,
        chapters: 0,
        error: None,
    };

    match probe(BufReader::new(file), options) {
        Ok(probe) => {
            record.codec = probe
                .selected
                .and_then(|serial| probe.streams.iter().find(|s| s.serial == serial))
                .map(|s| s.codec);
            record.chapters = probe.chapters.len();
            if let Some(comment) = probe.comment {
                record.comments = comment.len();
                record.vendor = Some(comment.vendor_string);
            }
        }
        Err(e) => record.error = Some(e.to_string()),
    }

    Ok(record)
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    options: ReaderOptions,
    files: Vec<FileChapters>,
    with_chapters: usize,
    without_chapters: usize,
}

/// Read chapters from every file in a directory matching a pattern
pub fn command_batch(
    directory: &str,
    pattern: &str,
    options: ReaderOptions,
    formatter: &OutputFormatter,
    writer: &mut impl Write,
) -> Result<()> {
    let glob_pattern = batch_pattern(directory, pattern);

    // Find matching files
    let mut files: Vec<String> = Vec::new();
    for entry in glob(&glob_pattern).with_context(|| format!("Invalid glob pattern: {}", glob_pattern))? {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    if let Some(path_str) = path.to_str() {
                        files.push(path_str.to_string());
                    }
                }
            }
            Err(e) => {
                formatter.print_error(&format!("Error reading path: {}", e));
            }
        }
    }

    if files.is_empty() {
        formatter.print_info("No files found matching pattern");
        return Ok(());
    }
    formatter.print_info(&format!("Processing {} files...", files.len()));

    let reader = ChapterReader::new(options);
    let mut summary = BatchSummary {
        options,
        files: Vec::with_capacity(files.len()),
        with_chapters: 0,
        without_chapters: 0,
    };

    for file_path in files {
        let chapters = reader.read_path(&file_path);
        if chapters.is_empty() {
            summary.without_chapters += 1;
        } else {
            summary.with_chapters += 1;
            formatter.print_success(&format!("{}: {} chapter(s)", file_path, chapters.len()));
        }
        summary.files.push(FileChapters {
            file: file_path,
            chapters: ChapterRecord::from_chapters(&chapters),
        });
    }

    if formatter.format() == OutputFormat::Table {
        for record in &summary.files {
            formatter.output_chapters(record, writer)?;
        }
    } else {
        formatter.output_value(&summary, writer)?;
    }

    formatter.print_info(&format!(
        "Completed: {} with chapters, {} without",
        summary.with_chapters, summary.without_chapters
    ));

    Ok(())
}

/// Build glob pattern
fn batch_pattern(directory: &str, pattern: &str) -> String {
    if pattern.contains('*') || pattern.contains('?') {
        format!("{}/{}", directory, pattern)
    } else {
        format!("{}/**/{}", directory, pattern)
    }
}
