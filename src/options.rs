// Reader configuration

use serde::Serialize;

/// Knobs controlling how strictly the OGG container is validated.
///
/// The defaults accept anything a typical player would: checksums are not
/// verified and a page that restarts a packet while another is still open
/// simply drops the open one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReaderOptions {
    /// Verify the CRC-32 of every page and reject mismatching pages.
    pub verify_checksums: bool,
    /// Treat a missing continuation flag on a page that should continue an
    /// open packet as a demux error instead of restarting the packet.
    pub strict: bool,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let options = ReaderOptions::default();
        assert!(!options.verify_checksums);
        assert!(!options.strict);
    }

    #[test]
    fn test_builder_setters() {
        let options = ReaderOptions::new().verify_checksums(true).strict(true);
        assert_eq!(
            options,
            ReaderOptions {
                verify_checksums: true,
                strict: true
            }
        );
    }
}
