// Synthetic OGG pages and codec headers shared by every test target.
// The including module provides `crc`.
#![allow(dead_code)]

use super::crc;

pub const CONTINUATION: u8 = 0x01;
pub const BOS: u8 = 0x02;
pub const EOS: u8 = 0x04;

/// Encode one page, checksum included.
pub fn page(header_type: u8, serial: u32, sequence: u32, segment_table: &[u8], data: &[u8]) -> Vec<u8> {
    assert_eq!(
        segment_table.iter().map(|&s| s as usize).sum::<usize>(),
        data.len()
    );
    let mut out = Vec::new();
    out.extend_from_slice(b"OggS");
    out.push(0);
    out.push(header_type);
    out.extend_from_slice(&0u64.to_le_bytes());
    out.extend_from_slice(&serial.to_le_bytes());
    out.extend_from_slice(&sequence.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.push(segment_table.len() as u8);
    out.extend_from_slice(segment_table);
    out.extend_from_slice(data);

    let checksum = crc::checksum(&out);
    out[22..26].copy_from_slice(&checksum.to_le_bytes());
    out
}

/// All packets of one stream, each packet on its own page.
pub fn stream(serial: u32, packets: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, packet) in packets.iter().enumerate() {
        let mut header_type = 0;
        if i == 0 {
            header_type |= BOS;
        }
        if i + 1 == packets.len() {
            header_type |= EOS;
        }
        out.extend(page(header_type, serial, i as u32, &lacing(packet.len()), packet));
    }
    out
}

/// A minimal Vorbis file: identification, comment and setup headers.
pub fn vorbis_file(entries: &[&str]) -> Vec<u8> {
    stream(0x5eed, &[vorbis_head(), vorbis_tags(entries), b"\x05vorbis".to_vec()])
}

pub fn opus_file(entries: &[&str]) -> Vec<u8> {
    stream(0x0b05, &[opus_head(), opus_tags(entries), vec![0xfc; 40]])
}

/// Segment table for one packet.
pub fn lacing(len: usize) -> Vec<u8> {
    let mut table = vec![255u8; len / 255];
    table.push((len % 255) as u8);
    table
}

pub fn comment_block(vendor: &str, entries: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    out.extend_from_slice(vendor.as_bytes());
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        out.extend_from_slice(entry.as_bytes());
    }
    out
}

pub fn opus_head() -> Vec<u8> {
    let mut head = b"OpusHead".to_vec();
    head.push(1); // version
    head.push(2); // channels
    head.extend_from_slice(&312u16.to_le_bytes()); // pre-skip
    head.extend_from_slice(&48_000u32.to_le_bytes());
    head.extend_from_slice(&0u16.to_le_bytes()); // output gain
    head.push(0); // mapping family
    head
}

pub fn vorbis_head() -> Vec<u8> {
    let mut head = b"\x01vorbis".to_vec();
    head.extend_from_slice(&0u32.to_le_bytes()); // version
    head.push(2); // channels
    head.extend_from_slice(&44_100u32.to_le_bytes());
    head.extend_from_slice(&0u32.to_le_bytes()); // bitrate max
    head.extend_from_slice(&128_000u32.to_le_bytes()); // nominal
    head.extend_from_slice(&0u32.to_le_bytes()); // min
    head.push(0xb8); // blocksizes
    head.push(1); // framing
    head
}

pub fn opus_tags(entries: &[&str]) -> Vec<u8> {
    let mut tags = b"OpusTags".to_vec();
    tags.extend(comment_block("libopus 1.4", entries));
    tags
}

pub fn vorbis_tags(entries: &[&str]) -> Vec<u8> {
    let mut tags = b"\x03vorbis".to_vec();
    tags.extend(comment_block("Xiph.Org libVorbis I 20200704 (Reducing Environment)", entries));
    tags.push(1);
    tags
}
