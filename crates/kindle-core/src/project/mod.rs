//! Everything that reads or changes an on-disk project
//!
//! - Content sniffing (substring search behind a trait)
//! - Bundler and feature detection for existing projects
//! - Idempotent, per-file mutation

pub mod detect;
pub mod mutate;
pub mod sniff;

pub use detect::{Detector, MANIFEST_FILE};
pub use mutate::{FileChange, FileMutator, Mode, Outcome};
pub use sniff::{ContentSniffer, SubstringSniffer};
