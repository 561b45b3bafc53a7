//! Template composition
//!
//! Every function in this module is pure: it turns a [`Plan`](crate::plan::Plan)
//! into file contents and never touches the disk. Composing twice from the same
//! plan yields byte-identical output, which the mutator relies on when it
//! compares files against generated content.

pub mod app;
pub mod backend;
pub mod config;
pub mod deploy;
pub mod entry;
pub mod lint;
pub mod readme;
pub mod storybook;

use std::path::PathBuf;

pub use entry::{compose_entry_file, Provider, PROVIDERS};
pub use lint::{compose_lint_config, LintVariant};
pub use readme::compose_readme;

/// Generated content for one target path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Target path relative to the project root
    pub path: PathBuf,

    /// Content the tool wants at `path` for the current plan
    pub content: String,

    /// Other shapes the tool has produced for this path (other bundlers,
    /// earlier releases). A file matching any of them is still tool-owned.
    pub variants: Vec<String>,

    /// Written with the executable bit (git hooks)
    pub executable: bool,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            variants: Vec::new(),
            executable: false,
        }
    }

    /// Attach known alternative shapes; duplicates of `content` are dropped
    pub fn with_variants(mut self, variants: impl IntoIterator<Item = String>) -> Self {
        for variant in variants {
            if variant != self.content && !self.variants.contains(&variant) {
                self.variants.push(variant);
            }
        }
        self
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    /// Whether `bytes` equals the content or any known variant exactly
    pub fn is_generated(&self, bytes: &[u8]) -> bool {
        self.content.as_bytes() == bytes || self.variants.iter().any(|v| v.as_bytes() == bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_skip_duplicates() {
        let artifact = Artifact::new("vercel.json", "a").with_variants(vec![
            "a".to_string(),
            "b".to_string(),
            "b".to_string(),
        ]);
        assert_eq!(artifact.variants, vec!["b".to_string()]);
    }

    #[test]
    fn test_is_generated_is_exact() {
        let artifact = Artifact::new("netlify.toml", "x\n").with_variants(vec!["y\n".to_string()]);
        assert!(artifact.is_generated(b"x\n"));
        assert!(artifact.is_generated(b"y\n"));
        assert!(!artifact.is_generated(b"x"));
        assert!(!artifact.is_generated(b"x\n\n"));
    }
}
