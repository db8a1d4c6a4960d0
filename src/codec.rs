// Codec identification from the first packet of a logical stream
//
// Opus: identification header starts with "OpusHead" (RFC 7845)
// Vorbis: identification header starts with packet type 0x01 + "vorbis"

use serde::Serialize;
use std::fmt;

pub const OPUS_HEAD_MAGIC: &[u8; 8] = b"OpusHead";
pub const VORBIS_HEAD_MAGIC: &[u8; 7] = b"\x01vorbis";

/// Codec carried by a logical stream, as far as chapter extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    Unknown,
    Opus,
    Vorbis,
}

impl Codec {
    /// Classify a stream by the leading bytes of its first packet.
    pub fn sniff(packet: &[u8]) -> Codec {
        if packet.starts_with(OPUS_HEAD_MAGIC) {
            Codec::Opus
        } else if packet.starts_with(VORBIS_HEAD_MAGIC) {
            Codec::Vorbis
        } else {
            Codec::Unknown
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Codec::Unknown => "unknown",
            Codec::Opus => "opus",
            Codec::Vorbis => "vorbis",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
