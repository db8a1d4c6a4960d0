// Chapter markers stored as Vorbis comments
//
// CHAPTER001=00:00:00.000
// CHAPTER001NAME=Prologue
// CHAPTER002=00:05:30.500
// CHAPTER002NAME=The Beginning
//
// The numeric index orders the chapters; the fields themselves may appear in
// any order.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;

const CHAPTER_PREFIX: &str = "CHAPTER";
const NAME_SUFFIX: &str = "NAME";

/// A chapter marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// Title, absent when the file only carries a start time.
    pub name: Option<String>,
    /// Offset from the start of the file.
    pub start: Duration,
}

impl Chapter {
    pub fn new(name: Option<String>, start: Duration) -> Self {
        Chapter { name, start }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", format_timestamp(self.start), name),
            None => write!(f, "{}", format_timestamp(self.start)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ChapterField {
    Start(u32),
    Name(u32),
}

/// Classify a comment key, ignoring ASCII case.
fn parse_key(key: &str) -> Option<ChapterField> {
    let upper = key.to_ascii_uppercase();
    let rest = upper.strip_prefix(CHAPTER_PREFIX)?;
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let index: u32 = rest[..digits_end].parse().ok()?;
    match &rest[digits_end..] {
        "" => Some(ChapterField::Start(index)),
        NAME_SUFFIX => Some(ChapterField::Name(index)),
        _ => None,
    }
}

/// Parse `H:MM:SS.mmm` into an offset.
///
/// Minutes and seconds must be below 60 and the fractional part (1 to 9
/// digits) is optional. Hours are limited only by the offset fitting in
/// `u64` milliseconds.
pub fn parse_timestamp(value: &str) -> Option<Duration> {
    let mut parts = value.trim().splitn(3, ':');
    let hours = parse_digits(parts.next()?)?;
    let minutes = parse_digits(parts.next()?)?;
    let seconds_part = parts.next()?;

    let (whole, fraction) = match seconds_part.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (seconds_part, None),
    };
    let seconds = parse_digits(whole)?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let nanos = match fraction {
        Some(fraction) => {
            if fraction.is_empty() || fraction.len() > 9 {
                return None;
            }
            let value = parse_digits(fraction)? as u32;
            value * 10u32.pow(9 - fraction.len() as u32)
        }
        None => 0,
    };

    let total_seconds = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
    total_seconds
        .checked_mul(1000)?
        .checked_add(u64::from(nanos / 1_000_000))?;
    Some(Duration::new(total_seconds, nanos))
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Render an offset as `HH:MM:SS.mmm`.
pub fn format_timestamp(offset: Duration) -> String {
    let total = offset.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        total / 3600,
        (total / 60) % 60,
        total % 60,
        offset.subsec_millis()
    )
}

/// Assemble chapters from comment fields, ordered by chapter index.
///
/// A chapter whose start time cannot be parsed is skipped; the rest are
/// still returned. Names without a matching start time are ignored.
pub fn extract_chapters(comments: &[(String, String)]) -> Vec<Chapter> {
    let mut starts: BTreeMap<u32, &str> = BTreeMap::new();
    let mut names: BTreeMap<u32, &str> = BTreeMap::new();

    for (key, value) in comments {
        let (slot, index) = match parse_key(key) {
            Some(ChapterField::Start(index)) => (&mut starts, index),
            Some(ChapterField::Name(index)) => (&mut names, index),
            None => continue,
        };
        if slot.contains_key(&index) {
            debug!("Ignoring duplicate chapter field {}", key);
            continue;
        }
        slot.insert(index, value.as_str());
    }

    starts
        .into_iter()
        .filter_map(|(index, value)| match parse_timestamp(value) {
            Some(start) => Some(Chapter {
                name: names.get(&index).map(|name| name.to_string()),
                start,
            }),
            None => {
                warn!("Skipping chapter {}: unparseable start time {:?}", index, value);
                None
            }
        })
        .collect()
}
