// Encoding utilities

use encoding_rs::UTF_8;

/// Decode UTF-8 text, replacing malformed sequences with U+FFFD.
///
/// Vorbis comments are specified as UTF-8 but taggers in the wild do not
/// always honour that; a bad byte should cost one character, not the file.
pub fn decode_utf8(data: &[u8]) -> String {
    let (text, had_errors) = UTF_8.decode_without_bom_handling(data);
    if had_errors {
        log::debug!("Replaced malformed UTF-8 in {} byte string", data.len());
    }
    text.into_owned()
}
