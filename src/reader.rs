// Chapter reading pipeline
//
// pages -> logical streams -> first Opus/Vorbis stream -> comment header
//       -> chapters
//
// Any failure along the way ends in an empty chapter list; the error is
// only logged.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, error};
use serde::Serialize;

use crate::chapter::Chapter;
use crate::codec::Codec;
use crate::error::Result;
use crate::ogg::vorbis::read_vorbis_comment;
use crate::ogg::{demux, LogicalStream, PageReader, Streams};
use crate::options::ReaderOptions;
use crate::opus::read_opus_comment;
use crate::vorbis_comment::VorbisComment;

/// Extracts chapter markers from OGG Vorbis and OGG Opus files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterReader {
    options: ReaderOptions,
}

impl ChapterReader {
    pub fn new(options: ReaderOptions) -> Self {
        ChapterReader { options }
    }

    /// Read chapters from a file on disk.
    ///
    /// Returns an empty list if the file cannot be opened, is not a
    /// well-formed OGG Vorbis/Opus file, or has no chapters.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Vec<Chapter> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => self.read(BufReader::new(file)),
            Err(e) => {
                error!("Cannot open {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Read chapters from a byte source positioned at the start of the file.
    ///
    /// The source is consumed to its end. Never fails: problems are logged and
    /// yield an empty list.
    pub fn read<R: Read>(&self, reader: R) -> Vec<Chapter> {
        match self.try_read(reader) {
            Ok(chapters) => chapters,
            Err(e) => {
                error!("Error in read: {}", e);
                Vec::new()
            }
        }
    }

    fn try_read<R: Read>(&self, reader: R) -> Result<Vec<Chapter>> {
        let (streams, _) = open_streams(reader, &self.options)?;
        match first_comment(streams)? {
            Some((_, comment)) => {
                let chapters = comment.chapters();
                debug!(
                    "Found {} chapter(s) in {} comment field(s)",
                    chapters.len(),
                    comment.len()
                );
                Ok(chapters)
            }
            None => {
                debug!("No Opus or Vorbis stream found");
                Ok(Vec::new())
            }
        }
    }
}

/// Demultiplex the whole input, returning the streams and the page count.
fn open_streams<R: Read>(reader: R, options: &ReaderOptions) -> Result<(Streams, u64)> {
    let mut pages = PageReader::new(reader).verify_checksums(options.verify_checksums);
    let streams = demux(&mut pages, options)?;
    debug!(
        "Read {} page(s) in {} logical stream(s)",
        pages.pages_read(),
        streams.len()
    );
    Ok((streams, pages.pages_read()))
}

/// Decode the comment header of the stream according to its codec.
fn read_comment(stream: &mut LogicalStream) -> Result<Option<VorbisComment>> {
    match stream.codec() {
        Codec::Opus => read_opus_comment(stream).map(Some),
        Codec::Vorbis => read_vorbis_comment(stream).map(Some),
        Codec::Unknown => Ok(None),
    }
}

/// Comment of the first stream recognized as Opus or Vorbis, with its serial.
fn first_comment(streams: Streams) -> Result<Option<(u32, VorbisComment)>> {
    for mut stream in streams {
        if let Some(comment) = read_comment(&mut stream)? {
            return Ok(Some((stream.serial(), comment)));
        }
        debug!("Skipping stream {:#010x} with unrecognized codec", stream.serial());
    }
    Ok(None)
}

/// Summary of one logical stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub serial: u32,
    pub codec: Codec,
    pub pages: u64,
    pub packets: usize,
}

/// What a file holds, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Probe {
    /// Pages read across all streams.
    pub pages: u64,
    pub streams: Vec<StreamSummary>,
    /// Serial of the stream chapters are read from.
    pub selected: Option<u32>,
    pub comment: Option<VorbisComment>,
    pub chapters: Vec<Chapter>,
}

/// Inspect a file and report its streams, comment and chapters.
///
/// Unlike [`ChapterReader::read`] this surfaces the error that stopped
/// decoding.
pub fn probe<R: Read>(reader: R, options: &ReaderOptions) -> Result<Probe> {
    let (streams, pages) = open_streams(reader, options)?;
    let summaries = streams
        .iter()
        .map(|stream| StreamSummary {
            serial: stream.serial(),
            codec: stream.codec(),
            pages: stream.page_count(),
            packets: stream.remaining(),
        })
        .collect();

    let (selected, comment) = match first_comment(streams)? {
        Some((serial, comment)) => (Some(serial), Some(comment)),
        None => (None, None),
    };
    let chapters = comment.as_ref().map(VorbisComment::chapters).unwrap_or_default();

    Ok(Probe {
        pages,
        streams: summaries,
        selected,
        comment,
        chapters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OggError;
    use crate::testutil::{ogg_file, opus_head, opus_tags, vorbis_head, vorbis_tags};
    use std::io::Cursor;
    use std::time::Duration;

    fn read(bytes: Vec<u8>) -> Vec<Chapter> {
        ChapterReader::default().read(Cursor::new(bytes))
    }

    #[test]
    fn test_reads_vorbis_chapters() {
        let file = ogg_file(&[(
            1,
            vec![
                vorbis_head(),
                vorbis_tags(&["CHAPTER01=00:00:00.000", "CHAPTER01NAME=Intro", "CHAPTER02=00:05:30.500"]),
            ],
        )]);

        assert_eq!(
            read(file),
            vec![
                Chapter::new(Some("Intro".to_string()), Duration::ZERO),
                Chapter::new(None, Duration::from_millis(330_500)),
            ]
        );
    }

    #[test]
    fn test_reads_opus_chapters() {
        let file = ogg_file(&[(1, vec![opus_head(), opus_tags(&["CHAPTER001=00:00:12.250"])])]);
        assert_eq!(read(file), vec![Chapter::new(None, Duration::from_millis(12_250))]);
    }

    #[test]
    fn test_non_ogg_input_is_empty() {
        assert!(read(Vec::new()).is_empty());
        assert!(read(b"Og".to_vec()).is_empty());
        assert!(read(b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec()).is_empty());
    }

    #[test]
    fn test_unknown_stream_skipped() {
        let file = ogg_file(&[
            (1, vec![b"\x80theora".to_vec(), b"\x81theora".to_vec()]),
            (2, vec![vorbis_head(), vorbis_tags(&["CHAPTER01=00:00:01.000"])]),
        ]);
        assert_eq!(read(file), vec![Chapter::new(None, Duration::from_secs(1))]);
    }

    #[test]
    fn test_only_first_recognized_stream_used() {
        let file = ogg_file(&[
            (1, vec![opus_head(), opus_tags(&["CHAPTER01=00:00:01.000"])]),
            (2, vec![vorbis_head(), vorbis_tags(&["CHAPTER01=00:00:02.000"])]),
        ]);
        assert_eq!(read(file), vec![Chapter::new(None, Duration::from_secs(1))]);
    }

    #[test]
    fn test_bad_selected_stream_is_empty() {
        let file = ogg_file(&[
            (1, vec![opus_head(), b"not tags".to_vec()]),
            (2, vec![vorbis_head(), vorbis_tags(&["CHAPTER01=00:00:02.000"])]),
        ]);
        assert!(read(file).is_empty());
    }

    #[test]
    fn test_read_path_missing_file() {
        let chapters = ChapterReader::default().read_path("/definitely/not/here.ogg");
        assert!(chapters.is_empty());
    }

    #[test]
    fn test_probe_reports_streams() {
        let file = ogg_file(&[
            (5, vec![b"fishead\0".to_vec()]),
            (9, vec![opus_head(), opus_tags(&["TITLE=x", "CHAPTER01=00:00:03.000"])]),
        ]);
        let probe = probe(Cursor::new(file), &ReaderOptions::default()).unwrap();

        assert_eq!(
            probe.streams,
            vec![
                StreamSummary { serial: 5, codec: Codec::Unknown, pages: 1, packets: 1 },
                StreamSummary { serial: 9, codec: Codec::Opus, pages: 1, packets: 2 },
            ]
        );
        assert_eq!(probe.pages, 2);
        assert_eq!(probe.selected, Some(9));
        assert_eq!(probe.comment.unwrap().len(), 2);
        assert_eq!(probe.chapters.len(), 1);
    }

    #[test]
    fn test_probe_surfaces_errors() {
        let mut file = ogg_file(&[(1, vec![vorbis_head(), vorbis_tags(&["CHAPTER01=00:00:00.000"])])]);
        file.truncate(file.len() - 4);
        assert!(matches!(
            probe(Cursor::new(file), &ReaderOptions::default()),
            Err(OggError::PageParse(_))
        ));
    }
}
