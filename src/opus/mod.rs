// OPUS format support (in OGG container)
//
// OPUS File Structure:
// - Uses OGG container (similar to OGG Vorbis)
// - Identification header packet: "OpusHead" (8 bytes) + channel/rate fields
// - Comment header packet: "OpusTags" (8 bytes) followed by Vorbis Comment
// - Audio data packets
//
// Reference:
// - https://wiki.xiph.org/OggOpus
// - RFC 7845: Ogg Encapsulation for the Opus Audio Codec

use log::debug;

use crate::error::{OggError, Result};
use crate::ogg::LogicalStream;
use crate::vorbis_comment::VorbisComment;

pub use crate::codec::OPUS_HEAD_MAGIC;
pub const OPUS_TAGS_MAGIC: &[u8; 8] = b"OpusTags";

/// Read the Vorbis comment carried by an Opus stream.
///
/// Consumes the identification header and the comment header packets.
pub fn read_opus_comment(stream: &mut LogicalStream) -> Result<VorbisComment> {
    // skip head packet
    stream
        .next()
        .ok_or_else(|| OggError::OpusStream("Opus head packet not present".to_string()))?;

    let tags_packet = stream
        .next()
        .ok_or_else(|| OggError::OpusStream("Opus tags packet not present".to_string()))?;

    let body = tags_packet
        .strip_prefix(OPUS_TAGS_MAGIC.as_slice())
        .ok_or_else(|| OggError::OpusStream("Invalid opus tags capture pattern".to_string()))?;

    debug!(
        "Decoding {} byte OpusTags packet of stream {:#010x}",
        tags_packet.len(),
        stream.serial()
    );
    VorbisComment::parse(body)
}
