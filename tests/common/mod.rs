// Synthetic OGG files for integration tests
#![allow(dead_code)]

use oggchapters::ogg::crc;

mod fixtures;
pub use fixtures::*;
