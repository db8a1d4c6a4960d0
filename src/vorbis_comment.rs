// Vorbis Comment decoding
//
// Shared by Vorbis (after "\x03vorbis") and Opus (after "OpusTags"):
// - Vendor length (u32 LE) + vendor string (UTF-8)
// - Comment count (u32 LE)
// - Per comment: length (u32 LE) + "FIELD=value" (UTF-8)
//
// Vorbis appends a framing bit after the last comment; it is ignored here.

use std::io::Cursor;

use log::debug;
use serde::Serialize;

use crate::chapter::{extract_chapters, Chapter};
use crate::error::{OggError, Result};
use crate::utils::encoding::decode_utf8;
use crate::utils::io::read_le_u32;

/// Vorbis comment structure
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct VorbisComment {
    pub vendor_string: String,
    /// Fields in file order, keys as written. Duplicates are kept.
    pub comments: Vec<(String, String)>,
}

impl VorbisComment {
    /// Decode a comment block, starting right after the codec's magic prefix.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let vendor_length = read_length(&mut cursor, "vendor length")?;
        let vendor_string = decode_utf8(take(&mut cursor, vendor_length, "vendor string")?);

        let comment_count = read_length(&mut cursor, "comment count")?;

        // Every comment needs at least its 4 byte length; don't let a bogus
        // count drive the allocation
        let capacity = comment_count.min(remaining(&cursor) / 4);
        let mut comments = Vec::with_capacity(capacity);
        for i in 0..comment_count {
            let comment_length = read_length(&mut cursor, "comment length")?;
            let comment_string = decode_utf8(take(&mut cursor, comment_length, "comment")?);

            // Parse comment (format: FIELD=value)
            match comment_string.split_once('=') {
                Some((field, value)) => comments.push((field.to_string(), value.to_string())),
                None => debug!("Skipping comment {} without '=' separator", i),
            }
        }

        if remaining(&cursor) > 0 {
            debug!("Ignoring {} trailing byte(s) after comments", remaining(&cursor));
        }

        Ok(VorbisComment {
            vendor_string,
            comments,
        })
    }

    /// Get a comment value by field name
    pub fn get(&self, field: &str) -> Option<&String> {
        self.comments
            .iter()
            .find(|(f, _)| f.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Chapter markers encoded in the `CHAPTERnn` / `CHAPTERnnNAME` fields.
    pub fn chapters(&self) -> Vec<Chapter> {
        extract_chapters(&self.comments)
    }
}

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len().saturating_sub(cursor.position() as usize)
}

fn read_length(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<usize> {
    read_le_u32(cursor)
        .map(|v| v as usize)
        .map_err(|_| OggError::CommentParse(format!("input exhausted reading {}", what)))
}

fn take<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize, what: &str) -> Result<&'a [u8]> {
    let available = remaining(cursor);
    if len > available {
        return Err(OggError::CommentParse(format!(
            "{} declares {} bytes but only {} remain",
            what, len, available
        )));
    }
    let data: &'a [u8] = *cursor.get_ref();
    let start = cursor.position() as usize;
    cursor.set_position((start + len) as u64);
    Ok(&data[start..start + len])
}
