// Error types for OGG chapter extraction

use std::io;
use thiserror::Error;

/// Everything that can go wrong while decoding an OGG file down to its
/// Vorbis comment.
///
/// These never escape [`crate::ChapterReader::read`]; they surface only through
/// the diagnostic [`crate::probe`] entry point and in log records.
#[derive(Debug, Error)]
pub enum OggError {
    /// Malformed OGG framing: bad capture pattern, bad version, truncated page,
    /// checksum mismatch.
    #[error("OGG page parse error: {0}")]
    PageParse(String),

    /// A logical stream violates packet continuation rules.
    #[error("OGG demux error: {0}")]
    Demux(String),

    /// Missing head/tags packet or bad `OpusTags` magic.
    #[error("Opus stream parse error: {0}")]
    OpusStream(String),

    /// Missing head/comment packet or bad `\x03vorbis` magic.
    #[error("Vorbis stream parse error: {0}")]
    VorbisStream(String),

    /// Truncated or inconsistent length-prefixed comment data.
    #[error("Vorbis comment parse error: {0}")]
    CommentParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, OggError>;
