// Logical bitstream demultiplexing and packet reassembly

use std::collections::{HashMap, VecDeque};

use log::{debug, warn};

use crate::codec::Codec;
use crate::error::{OggError, Result};
use crate::ogg::{OggPage, OGG_MAX_SEGMENT_SIZE};
use crate::options::ReaderOptions;

/// Reassembled packets of one logical bitstream.
///
/// Packets are handed out in stream order through [`Iterator::next`], each at
/// most once. [`LogicalStream::peek`] looks at the next packet without
/// consuming it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalStream {
    serial: u32,
    pages: u64,
    packets: VecDeque<Vec<u8>>,
}

impl LogicalStream {
    fn new(serial: u32) -> Self {
        LogicalStream {
            serial,
            pages: 0,
            packets: VecDeque::new(),
        }
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// Number of pages that carried this stream.
    pub fn page_count(&self) -> u64 {
        self.pages
    }

    /// Next packet, left in place.
    pub fn peek(&self) -> Option<&[u8]> {
        self.packets.front().map(Vec::as_slice)
    }

    /// Packets not yet consumed.
    pub fn remaining(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Codec announced by the next packet, normally the identification header.
    pub fn codec(&self) -> Codec {
        self.peek().map(Codec::sniff).unwrap_or(Codec::Unknown)
    }
}

impl Iterator for LogicalStream {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.packets.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.packets.len(), Some(self.packets.len()))
    }
}

/// Logical streams keyed by serial number, in order of first appearance.
#[derive(Debug, Default)]
pub struct Streams {
    streams: Vec<LogicalStream>,
    index: HashMap<u32, usize>,
}

impl Streams {
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn get(&self, serial: u32) -> Option<&LogicalStream> {
        self.index.get(&serial).map(|&i| &self.streams[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogicalStream> {
        self.streams.iter()
    }
}

impl IntoIterator for Streams {
    type Item = LogicalStream;
    type IntoIter = std::vec::IntoIter<LogicalStream>;

    fn into_iter(self) -> Self::IntoIter {
        self.streams.into_iter()
    }
}

/// Per-serial reassembly state.
struct Assembler {
    stream: LogicalStream,
    open: Option<Vec<u8>>,
}

impl Assembler {
    fn push_page(&mut self, page: &OggPage, strict: bool) -> Result<()> {
        let serial = self.stream.serial;
        let sequence = page.header.page_sequence;
        self.stream.pages += 1;

        let mut skip_orphan = false;
        match (self.open.is_some(), page.header.is_continuation()) {
            (true, false) => {
                if strict {
                    return Err(OggError::Demux(format!(
                        "page {} of stream {:#010x} starts a new packet while one is still open",
                        sequence, serial
                    )));
                }
                if let Some(dropped) = self.open.take() {
                    warn!(
                        "Page {} of stream {:#010x} lacks the continuation flag, dropping {} byte partial packet",
                        sequence,
                        serial,
                        dropped.len()
                    );
                }
            }
            (false, true) => {
                debug!(
                    "Page {} of stream {:#010x} continues a packet that was never started, skipping fragment",
                    sequence, serial
                );
                skip_orphan = true;
            }
            _ => {}
        }

        for segment in page.segments() {
            let terminal = segment.len() < OGG_MAX_SEGMENT_SIZE as usize;
            if skip_orphan {
                skip_orphan = !terminal;
                continue;
            }
            self.open.get_or_insert_with(Vec::new).extend_from_slice(segment);
            if terminal {
                if let Some(packet) = self.open.take() {
                    self.stream.packets.push_back(packet);
                }
            }
        }

        if page.header.is_eos() {
            if let Some(packet) = self.open.take() {
                debug!(
                    "Stream {:#010x} ends on a 255 byte segment, closing {} byte packet",
                    serial,
                    packet.len()
                );
                self.stream.packets.push_back(packet);
            }
        }

        Ok(())
    }

    fn finish(self) -> LogicalStream {
        if let Some(partial) = self.open {
            debug!(
                "Discarding trailing {} byte partial packet of stream {:#010x}",
                partial.len(),
                self.stream.serial
            );
        }
        self.stream
    }
}

/// Split a page sequence into its logical streams.
///
/// Consumes every page before returning: OGG gives no guarantee about how
/// streams interleave, so no stream is complete until the input is.
pub fn demux<I>(pages: I, options: &ReaderOptions) -> Result<Streams>
where
    I: IntoIterator<Item = Result<OggPage>>,
{
    let mut assemblers: Vec<Assembler> = Vec::new();
    let mut index: HashMap<u32, usize> = HashMap::new();

    for page in pages {
        let page = page?;
        let serial = page.header.bitstream_serial;
        let slot = *index.entry(serial).or_insert_with(|| {
            assemblers.push(Assembler {
                stream: LogicalStream::new(serial),
                open: None,
            });
            assemblers.len() - 1
        });
        assemblers[slot].push_page(&page, options.strict)?;
    }

    let streams: Vec<LogicalStream> = assemblers.into_iter().map(Assembler::finish).collect();
    debug!(
        "Demultiplexed {} logical stream(s): {:?}",
        streams.len(),
        streams
            .iter()
            .map(|s| (s.serial, s.packets.len()))
            .collect::<Vec<_>>()
    );

    Ok(Streams { streams, index })
}
