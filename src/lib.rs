//! Chapter markers from OGG Vorbis and OGG Opus files.
//!
//! Audiobook tools store chapters as Vorbis comments:
//!
//! ```text
//! CHAPTER001=00:00:00.000
//! CHAPTER001NAME=Prologue
//! CHAPTER002=00:12:41.370
//! CHAPTER002NAME=Departure
//! ```
//!
//! [`read_chapters`] walks the OGG pages, picks the first Opus or Vorbis
//! stream, decodes its comment header and returns the chapters ordered by
//! index. Unreadable or chapterless files give an empty list.
//!
//! ```no_run
//! for chapter in oggchapters::read_chapters("book.opus") {
//!     println!("{}", chapter);
//! }
//! ```

use std::io::Read;
use std::path::Path;

pub mod chapter;
pub mod codec;
pub mod error;
pub mod ogg;
pub mod options;
pub mod opus;
pub mod reader;
pub mod vorbis_comment;
mod utils;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
mod testutil;

pub use chapter::{format_timestamp, parse_timestamp, Chapter};
pub use codec::Codec;
pub use error::{OggError, Result};
pub use options::ReaderOptions;
pub use reader::{probe, ChapterReader, Probe, StreamSummary};
pub use vorbis_comment::VorbisComment;

/// Read chapters from the OGG file at `path` with default options.
pub fn read_chapters<P: AsRef<Path>>(path: P) -> Vec<Chapter> {
    ChapterReader::default().read_path(path)
}

/// Read chapters from an OGG byte source with default options.
pub fn read_chapters_from<R: Read>(reader: R) -> Vec<Chapter> {
    ChapterReader::default().read(reader)
}
