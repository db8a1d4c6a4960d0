use std::io::Read;

use crate::error::{OggError, Result};
use crate::ogg::{
    crc, OGG_HEADER_SIZE, OGG_HEADER_TYPE_BOS, OGG_HEADER_TYPE_CONTINUATION,
    OGG_HEADER_TYPE_EOS, OGG_SIGNATURE,
};
use crate::utils::io::read_up_to;

/// Byte range of the checksum inside the fixed header.
const CRC_RANGE: std::ops::Range<usize> = 22..26;

/// OGG Page Header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OggPageHeader {
    pub version: u8,
    pub header_type: u8,
    pub granule_position: u64,
    pub bitstream_serial: u32,
    pub page_sequence: u32,
    pub crc: u32,
    pub segment_table: Vec<u8>,
}

/// OGG Page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OggPage {
    pub header: OggPageHeader,
    pub data: Vec<u8>,
}

impl OggPageHeader {
    /// Read an OGG page header from a reader.
    ///
    /// Returns `Ok(None)` when the reader is exhausted exactly at a page
    /// boundary.
    pub fn read<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut header = [0u8; OGG_HEADER_SIZE];
        let n = read_up_to(reader, &mut header)?;
        if n == 0 {
            return Ok(None);
        }

        // Check OGG signature on whatever we got, so garbage is reported as
        // such rather than as a short read
        let sig_len = n.min(OGG_SIGNATURE.len());
        if header[..sig_len] != OGG_SIGNATURE[..sig_len] {
            return Err(OggError::PageParse("invalid capture pattern".to_string()));
        }
        if n < OGG_HEADER_SIZE {
            return Err(OggError::PageParse(format!(
                "truncated page header: {} of {} bytes",
                n, OGG_HEADER_SIZE
            )));
        }

        let version = header[4];
        if version != 0 {
            return Err(OggError::PageParse(format!(
                "unsupported stream structure version {}",
                version
            )));
        }

        let segment_count = header[26] as usize;
        let mut segment_table = vec![0u8; segment_count];
        let n = read_up_to(reader, &mut segment_table)?;
        if n < segment_count {
            return Err(OggError::PageParse(format!(
                "truncated segment table: {} of {} entries",
                n, segment_count
            )));
        }

        Ok(Some(OggPageHeader {
            version,
            header_type: header[5],
            granule_position: u64::from_le_bytes(le_array(&header[6..14])),
            bitstream_serial: u32::from_le_bytes(le_array(&header[14..18])),
            page_sequence: u32::from_le_bytes(le_array(&header[18..22])),
            crc: u32::from_le_bytes(le_array(&header[CRC_RANGE])),
            segment_table,
        }))
    }

    /// Calculate total page data size from segment table
    pub fn data_size(&self) -> usize {
        self.segment_table.iter().map(|&x| x as usize).sum()
    }

    /// First segment of this page continues a packet from an earlier page
    pub fn is_continuation(&self) -> bool {
        self.header_type & OGG_HEADER_TYPE_CONTINUATION != 0
    }

    /// Check if this is the beginning of a stream
    pub fn is_bos(&self) -> bool {
        self.header_type & OGG_HEADER_TYPE_BOS != 0
    }

    /// Check if this is the last page of a stream
    pub fn is_eos(&self) -> bool {
        self.header_type & OGG_HEADER_TYPE_EOS != 0
    }

    /// Serialized header bytes with the checksum field zeroed, as covered by
    /// the page CRC.
    fn checksum_input(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(OGG_HEADER_SIZE + self.segment_table.len());
        bytes.extend_from_slice(OGG_SIGNATURE);
        bytes.push(self.version);
        bytes.push(self.header_type);
        bytes.extend_from_slice(&self.granule_position.to_le_bytes());
        bytes.extend_from_slice(&self.bitstream_serial.to_le_bytes());
        bytes.extend_from_slice(&self.page_sequence.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 4]);
        bytes.push(self.segment_table.len() as u8);
        bytes.extend_from_slice(&self.segment_table);
        bytes
    }
}

impl OggPage {
    /// Read an OGG page from a reader, `Ok(None)` at a clean end of input.
    pub fn read<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let header = match OggPageHeader::read(reader)? {
            Some(header) => header,
            None => return Ok(None),
        };

        // Read page data
        let data_size = header.data_size();
        let mut data = vec![0u8; data_size];
        let n = read_up_to(reader, &mut data)?;
        if n < data_size {
            return Err(OggError::PageParse(format!(
                "truncated payload on page {} of stream {:#010x}: {} of {} bytes",
                header.page_sequence, header.bitstream_serial, n, data_size
            )));
        }

        Ok(Some(OggPage { header, data }))
    }

    /// CRC-32 of this page as it would be stored in the header.
    pub fn compute_checksum(&self) -> u32 {
        let crc = crc::checksum(&self.header.checksum_input());
        crc::update(crc, &self.data)
    }

    /// Payload slices, one per lacing segment.
    pub fn segments(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let mut offset = 0;
        self.header.segment_table.iter().map(move |&size| {
            let start = offset;
            offset += size as usize;
            &self.data[start..offset]
        })
    }
}

/// Lazy, single-pass sequence of pages read from a byte source.
///
/// Iteration stops cleanly at end of input between pages. The first error is
/// yielded once and the iterator is fused afterwards.
pub struct PageReader<R> {
    reader: R,
    verify_checksums: bool,
    pages_read: u64,
    done: bool,
}

impl<R: Read> PageReader<R> {
    pub fn new(reader: R) -> Self {
        PageReader {
            reader,
            verify_checksums: false,
            pages_read: 0,
            done: false,
        }
    }

    /// Reject pages whose stored checksum does not match their content.
    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// Number of pages successfully read so far.
    pub fn pages_read(&self) -> u64 {
        self.pages_read
    }

    fn next_page(&mut self) -> Result<Option<OggPage>> {
        let page = match OggPage::read(&mut self.reader)? {
            Some(page) => page,
            None => return Ok(None),
        };

        if self.verify_checksums {
            let computed = page.compute_checksum();
            if computed != page.header.crc {
                return Err(OggError::PageParse(format!(
                    "checksum mismatch on page {} of stream {:#010x}: stored {:#010x}, computed {:#010x}",
                    page.header.page_sequence,
                    page.header.bitstream_serial,
                    page.header.crc,
                    computed
                )));
            }
        }

        self.pages_read += 1;
        Ok(Some(page))
    }
}

impl<R: Read> Iterator for PageReader<R> {
    type Item = Result<OggPage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_page() {
            Ok(Some(page)) => Some(Ok(page)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for PageReader<R> {}

fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}
