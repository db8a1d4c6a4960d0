// Builders for synthetic OGG data used by unit tests

use crate::ogg::{
    crc, OggPage, OggPageHeader, OGG_HEADER_TYPE_BOS, OGG_HEADER_TYPE_CONTINUATION,
    OGG_HEADER_TYPE_EOS, OGG_SIGNATURE,
};

#[path = "../tests/common/fixtures.rs"]
mod fixtures;
pub use fixtures::*;

#[derive(Debug, Clone, Default)]
pub struct PageSpec {
    pub header_type: u8,
    pub granule_position: u64,
    pub serial: u32,
    pub sequence: u32,
    pub segment_table: Vec<u8>,
    pub data: Vec<u8>,
}

impl PageSpec {
    fn into_page(self) -> OggPage {
        OggPage {
            header: OggPageHeader {
                version: 0,
                header_type: self.header_type,
                granule_position: self.granule_position,
                bitstream_serial: self.serial,
                page_sequence: self.sequence,
                crc: 0,
                segment_table: self.segment_table,
            },
            data: self.data,
        }
    }
}

/// Serialize a page, filling in its checksum.
pub fn encode_page(page: &OggPage) -> Vec<u8> {
    let crc = page.compute_checksum();
    let h = &page.header;
    let mut out = Vec::new();
    out.extend_from_slice(OGG_SIGNATURE);
    out.push(h.version);
    out.push(h.header_type);
    out.extend_from_slice(&h.granule_position.to_le_bytes());
    out.extend_from_slice(&h.bitstream_serial.to_le_bytes());
    out.extend_from_slice(&h.page_sequence.to_le_bytes());
    out.extend_from_slice(&crc.to_le_bytes());
    out.push(h.segment_table.len() as u8);
    out.extend_from_slice(&h.segment_table);
    out.extend_from_slice(&page.data);
    out
}

pub fn page_bytes(spec: &PageSpec) -> Vec<u8> {
    encode_page(&spec.clone().into_page())
}

/// Pages carrying `packets` for one stream, at most 255 segments per page.
pub fn stream_pages(serial: u32, packets: &[Vec<u8>]) -> Vec<OggPage> {
    let mut pages = Vec::new();
    let mut table: Vec<u8> = Vec::new();
    let mut data: Vec<u8> = Vec::new();
    let mut header_type = OGG_HEADER_TYPE_BOS;

    for packet in packets {
        let mut offset = 0;
        for len in lacing(packet.len()) {
            if table.len() == 255 {
                let sequence = pages.len() as u32;
                pages.push(make_page(serial, header_type, sequence, &mut table, &mut data));
                header_type = if offset > 0 { OGG_HEADER_TYPE_CONTINUATION } else { 0 };
            }
            table.push(len);
            data.extend_from_slice(&packet[offset..offset + len as usize]);
            offset += len as usize;
        }
    }

    if !table.is_empty() || pages.is_empty() {
        let sequence = pages.len() as u32;
        pages.push(make_page(
            serial,
            header_type | OGG_HEADER_TYPE_EOS,
            sequence,
            &mut table,
            &mut data,
        ));
    }
    pages
}

fn make_page(
    serial: u32,
    header_type: u8,
    sequence: u32,
    table: &mut Vec<u8>,
    data: &mut Vec<u8>,
) -> OggPage {
    PageSpec {
        header_type,
        granule_position: 0,
        serial,
        sequence,
        segment_table: std::mem::take(table),
        data: std::mem::take(data),
    }
    .into_page()
}

/// Complete file bytes, streams laid out one after another.
pub fn ogg_file(streams: &[(u32, Vec<Vec<u8>>)]) -> Vec<u8> {
    streams
        .iter()
        .flat_map(|(serial, packets)| stream_pages(*serial, packets))
        .flat_map(|page| encode_page(&page))
        .collect()
}
