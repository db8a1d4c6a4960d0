// OGG container support
//
// OGG File Structure:
// - OGG Page Header (27 bytes)
//   - Capture Pattern: "OggS" (4 bytes)
//   - Version: 0 (1 byte)
//   - Header Type: 1=continuation, 2=bos, 4=eos (1 byte)
//   - Granule Position (8 bytes)
//   - Bitstream Serial Number (4 bytes)
//   - Page Sequence Number (4 bytes)
//   - CRC Checksum (4 bytes)
//   - Number of Page Segments (1 byte)
//   - Segment Table (variable)
//
// Several logical bitstreams may be interleaved page by page; each one is a
// sequence of packets split into 255-byte lacing segments. A segment shorter
// than 255 bytes closes the packet.
//
// Vorbis and Opus streams both start with an identification packet followed
// by a comment packet carrying a Vorbis Comment.

pub mod crc;
pub mod demux;
pub mod page;
pub mod vorbis;

pub use demux::{demux, LogicalStream, Streams};
pub use page::{OggPage, OggPageHeader, PageReader};

// OGG signature
pub const OGG_SIGNATURE: &[u8; 4] = b"OggS";

/// Fixed part of a page header, up to and including the segment count.
pub const OGG_HEADER_SIZE: usize = 27;

/// Segments of this size continue the packet into the next segment.
pub const OGG_MAX_SEGMENT_SIZE: u8 = 255;

// OGG page header types
pub const OGG_HEADER_TYPE_CONTINUATION: u8 = 0x01;
pub const OGG_HEADER_TYPE_BOS: u8 = 0x02; // Beginning of Stream
pub const OGG_HEADER_TYPE_EOS: u8 = 0x04; // End of Stream
