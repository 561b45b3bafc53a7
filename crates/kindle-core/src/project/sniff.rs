//! Content sniffing for dependency and marker detection
//!
//! Presence checks are raw substring searches over file bytes, not structured
//! parsing. A package whose name is a substring of another can false-positive.
//! Callers only see the [`ContentSniffer`] trait so a parsing implementation can
//! replace [`SubstringSniffer`] without touching them.

/// Decides whether a needle is present in some file content
pub trait ContentSniffer: Send + Sync {
    fn contains(&self, haystack: &[u8], needle: &str) -> bool;
}

/// Byte-level substring search
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringSniffer;

impl ContentSniffer for SubstringSniffer {
    fn contains(&self, haystack: &[u8], needle: &str) -> bool {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        haystack
            .windows(needle.len())
            .any(|window| window == needle)
    }
}
