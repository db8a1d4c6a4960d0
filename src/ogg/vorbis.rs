// OGG Vorbis comment header
//
// Vorbis header packets:
// 1. Identification Header: 0x01 "vorbis" ...
// 2. Comment Header: 0x03 "vorbis" + Vorbis Comment + framing bit
// 3. Setup Header: 0x05 "vorbis" ...

use log::debug;

use crate::error::{OggError, Result};
use crate::ogg::LogicalStream;
use crate::vorbis_comment::VorbisComment;

pub use crate::codec::VORBIS_HEAD_MAGIC;
pub const VORBIS_TAGS_MAGIC: &[u8; 7] = b"\x03vorbis";

/// Read the Vorbis comment carried by a Vorbis stream.
///
/// Consumes the identification header and the comment header packets.
pub fn read_vorbis_comment(stream: &mut LogicalStream) -> Result<VorbisComment> {
    // skip head packet
    stream.next().ok_or_else(|| {
        OggError::VorbisStream("Vorbis identification header packet not present".to_string())
    })?;

    let tags_packet = stream.next().ok_or_else(|| {
        OggError::VorbisStream("Vorbis comment header packet not present".to_string())
    })?;

    let body = tags_packet
        .strip_prefix(VORBIS_TAGS_MAGIC.as_slice())
        .ok_or_else(|| {
            OggError::VorbisStream("Invalid vorbis comment header capture pattern".to_string())
        })?;

    debug!(
        "Decoding {} byte Vorbis comment header of stream {:#010x}",
        tags_packet.len(),
        stream.serial()
    );
    VorbisComment::parse(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ogg::demux;
    use crate::options::ReaderOptions;
    use crate::testutil::{comment_block, stream_pages, vorbis_head};

    fn stream_of(packets: Vec<Vec<u8>>) -> LogicalStream {
        let pages = stream_pages(3, &packets).into_iter().map(Ok);
        demux(pages, &ReaderOptions::default())
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_reads_comment_header() {
        let mut tags = VORBIS_TAGS_MAGIC.to_vec();
        tags.extend(comment_block("Xiph.Org libVorbis I 20150105", &["ARTIST=Narrator"]));
        tags.push(1);
        let mut stream = stream_of(vec![vorbis_head(), tags, b"\x05vorbis".to_vec()]);

        let comment = read_vorbis_comment(&mut stream).unwrap();
        assert_eq!(comment.vendor_string, "Xiph.Org libVorbis I 20150105");
        assert_eq!(comment.get("artist").unwrap(), "Narrator");
        // setup header left untouched
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn test_missing_comment_header() {
        let mut stream = stream_of(vec![vorbis_head()]);
        let err = read_vorbis_comment(&mut stream).unwrap_err();
        assert!(matches!(err, OggError::VorbisStream(msg) if msg.contains("not present")));
    }

    #[test]
    fn test_empty_stream() {
        let mut stream = stream_of(vec![]);
        let err = read_vorbis_comment(&mut stream).unwrap_err();
        assert!(matches!(err, OggError::VorbisStream(msg) if msg.contains("identification")));
    }

    #[test]
    fn test_bad_comment_magic() {
        let mut stream = stream_of(vec![vorbis_head(), b"\x05vorbis\0\0\0\0\0\0\0\0".to_vec()]);
        let err = read_vorbis_comment(&mut stream).unwrap_err();
        assert!(matches!(err, OggError::VorbisStream(msg) if msg.contains("capture pattern")));
    }
}
