//! Idempotent file mutation
//!
//! Each call touches at most one file and decides between writing, skipping,
//! leaving a customised file alone, or deleting a file the tool still owns.
//! A file whose bytes differ from every known generated shape is never deleted.
//! There is no multi-file rollback: a failure leaves earlier mutations in place.

use super::sniff::ContentSniffer;
use crate::error::{Result, ScaffoldError};
use crate::templates::Artifact;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What happened to a single target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Content was written (created or overwritten)
    Written,
    /// The desired content or marker was already there; nothing written
    SkippedAlreadyPresent,
    /// The file diverges from every generated shape; left untouched
    SkippedDiverged,
    /// The file matched a generated shape and was removed
    Deleted,
    /// Nothing to act on: the file (or the marked construct) is absent
    NoOpAbsent,
}

impl Outcome {
    /// Whether the file on disk changed
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Written | Outcome::Deleted)
    }
}

/// Strategy applied by [`FileMutator::reconcile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'m> {
    /// Fully tool-owned file: always write
    Overwrite,
    /// Write only when the file does not exist yet
    CreateIfAbsent,
    /// Prepend the artifact content to an existing file unless the marker is
    /// present; an absent file is left absent
    PrependUnlessMarked(&'m str),
    /// Write when absent or still generated; a customised file is left alone
    ReplaceIfOwned,
    /// Delete only when the bytes equal the content or a known variant
    DeleteIfOwned,
}

/// One reconciled path and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Applies artifacts to files below a project root
pub struct FileMutator<'a> {
    root: &'a Path,
    sniffer: &'a dyn ContentSniffer,
}

impl<'a> FileMutator<'a> {
    pub fn new(root: &'a Path, sniffer: &'a dyn ContentSniffer) -> Self {
        Self { root, sniffer }
    }

    /// Reconcile one artifact with the file at its path
    pub fn reconcile(&self, artifact: &Artifact, mode: Mode<'_>) -> Result<Outcome> {
        let current = self.read(&artifact.path)?;

        let outcome = match (mode, current) {
            (Mode::Overwrite, _) | (Mode::CreateIfAbsent, None) => {
                self.write(&artifact.path, artifact.content.as_bytes(), artifact.executable)?;
                Outcome::Written
            }
            (Mode::CreateIfAbsent, Some(_)) => Outcome::SkippedAlreadyPresent,
            (Mode::PrependUnlessMarked(_), None) => Outcome::NoOpAbsent,
            (Mode::PrependUnlessMarked(marker), Some(bytes)) => {
                if self.sniffer.contains(&bytes, marker) {
                    Outcome::SkippedAlreadyPresent
                } else {
                    let mut combined = artifact.content.clone().into_bytes();
                    combined.extend_from_slice(&bytes);
                    self.write(&artifact.path, &combined, artifact.executable)?;
                    Outcome::Written
                }
            }
            (Mode::ReplaceIfOwned, None) => {
                self.write(&artifact.path, artifact.content.as_bytes(), artifact.executable)?;
                Outcome::Written
            }
            (Mode::ReplaceIfOwned, Some(bytes)) => {
                if bytes == artifact.content.as_bytes() {
                    Outcome::SkippedAlreadyPresent
                } else if artifact.is_generated(&bytes) {
                    self.write(&artifact.path, artifact.content.as_bytes(), artifact.executable)?;
                    Outcome::Written
                } else {
                    Outcome::SkippedDiverged
                }
            }
            (Mode::DeleteIfOwned, None) => Outcome::NoOpAbsent,
            (Mode::DeleteIfOwned, Some(bytes)) => {
                if artifact.is_generated(&bytes) {
                    self.delete(&artifact.path)?;
                    Outcome::Deleted
                } else {
                    Outcome::SkippedDiverged
                }
            }
        };

        tracing::debug!(path = %artifact.path.display(), ?mode, ?outcome, "reconciled");
        Ok(outcome)
    }

    /// Write the composed artifact unless `path` already carries `marker`.
    ///
    /// `compose` is not called when the marker is found, so a hand-edited file
    /// that already wires the construct in is never regenerated.
    pub fn ensure_marked<F>(&self, path: &Path, marker: &str, compose: F) -> Result<Outcome>
    where
        F: FnOnce() -> Artifact,
    {
        if let Some(bytes) = self.read(path)? {
            if self.sniffer.contains(&bytes, marker) {
                tracing::debug!(path = %path.display(), marker, "marker already present");
                return Ok(Outcome::SkippedAlreadyPresent);
            }
        }

        let artifact = compose();
        self.reconcile(&artifact, Mode::Overwrite)
    }

    /// Drop a marked construct by re-deriving the whole file.
    ///
    /// When `path` contains `marker`, the file is replaced by `recompose()`,
    /// which must come from a plan with that construct turned off. The result
    /// is always exactly what composition produces for the reduced plan.
    pub fn unwrap<F>(&self, path: &Path, marker: &str, recompose: F) -> Result<Outcome>
    where
        F: FnOnce() -> Artifact,
    {
        let Some(bytes) = self.read(path)? else {
            return Ok(Outcome::NoOpAbsent);
        };

        if !self.sniffer.contains(&bytes, marker) {
            tracing::debug!(path = %path.display(), marker, "marker not present");
            return Ok(Outcome::NoOpAbsent);
        }

        let artifact = recompose();
        self.reconcile(&artifact, Mode::Overwrite)
    }

    /// Whether the file at `path` exists and contains `marker`
    pub fn contains_marker(&self, path: &Path, marker: &str) -> Result<bool> {
        Ok(self
            .read(path)?
            .is_some_and(|bytes| self.sniffer.contains(&bytes, marker)))
    }

    /// Current text of the file at `path`, if it exists
    pub fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        Ok(self
            .read(path)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Remove a directory below the root if it is empty; returns whether it was removed
    pub fn remove_dir_if_empty(&self, relative: &Path) -> Result<bool> {
        let dir = self.root.join(relative);
        match fs::read_dir(&dir) {
            Ok(mut entries) => {
                if entries.next().is_some() {
                    return Ok(false);
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(ScaffoldError::io("Failed to read directory", dir, e)),
        }

        fs::remove_dir(&dir).map_err(|e| ScaffoldError::io("Failed to remove", &dir, e))?;
        Ok(true)
    }

    fn read(&self, relative: &Path) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(relative);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScaffoldError::io("Failed to read", path, e)),
        }
    }

    fn write(&self, relative: &Path, content: &[u8], executable: bool) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::io("Failed to create directory", parent, e))?;
        }

        fs::write(&path, content).map_err(|e| ScaffoldError::io("Failed to write", &path, e))?;

        if executable {
            set_executable(&path)?;
        }
        Ok(())
    }

    fn delete(&self, relative: &Path) -> Result<()> {
        let path = self.root.join(relative);
        fs::remove_file(&path).map_err(|e| ScaffoldError::io("Failed to delete", path, e))
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| ScaffoldError::io("Failed to set permissions on", path, e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::sniff::SubstringSniffer;

    fn read(root: &Path, relative: &str) -> String {
        fs::read_to_string(root.join(relative)).unwrap()
    }

    #[test]
    fn test_create_if_absent_keeps_existing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src/stores")).unwrap();
        fs::write(tmp.path().join("src/stores/useAppStore.ts"), "mine").unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let artifact = Artifact::new("src/stores/useAppStore.ts", "generated");
        let outcome = mutator.reconcile(&artifact, Mode::CreateIfAbsent).unwrap();

        assert_eq!(outcome, Outcome::SkippedAlreadyPresent);
        assert_eq!(read(tmp.path(), "src/stores/useAppStore.ts"), "mine");
    }

    #[test]
    fn test_delete_if_owned_removes_exact_match() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("vercel.json"), "{}\n").unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let artifact = Artifact::new("vercel.json", "{}\n");
        let outcome = mutator.reconcile(&artifact, Mode::DeleteIfOwned).unwrap();

        assert_eq!(outcome, Outcome::Deleted);
        assert!(!tmp.path().join("vercel.json").exists());
    }

    #[test]
    fn test_delete_if_owned_accepts_known_variant() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Dockerfile"), "FROM oven/bun\n").unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let artifact = Artifact::new("Dockerfile", "FROM node\n")
            .with_variants(vec!["FROM oven/bun\n".to_string()]);
        let outcome = mutator.reconcile(&artifact, Mode::DeleteIfOwned).unwrap();

        assert_eq!(outcome, Outcome::Deleted);
    }

    #[test]
    fn test_delete_if_owned_never_touches_edited_file() {
        let tmp = tempfile::tempdir().unwrap();
        let edited = "{}\n// keep my redirects\n";
        fs::write(tmp.path().join("vercel.json"), edited).unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let artifact = Artifact::new("vercel.json", "{}\n");
        let outcome = mutator.reconcile(&artifact, Mode::DeleteIfOwned).unwrap();

        assert_eq!(outcome, Outcome::SkippedDiverged);
        assert_eq!(read(tmp.path(), "vercel.json"), edited);
    }

    #[test]
    fn test_delete_if_owned_absent_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let artifact = Artifact::new("netlify.toml", "x");
        let outcome = mutator.reconcile(&artifact, Mode::DeleteIfOwned).unwrap();
        assert_eq!(outcome, Outcome::NoOpAbsent);
    }

    #[test]
    fn test_prepend_unless_marked() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/index.css"), "body {}\n").unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let artifact = Artifact::new("src/index.css", "@import 'bulma';\n");
        let first = mutator
            .reconcile(&artifact, Mode::PrependUnlessMarked("bulma"))
            .unwrap();
        let second = mutator
            .reconcile(&artifact, Mode::PrependUnlessMarked("bulma"))
            .unwrap();

        assert_eq!(first, Outcome::Written);
        assert_eq!(second, Outcome::SkippedAlreadyPresent);
        assert_eq!(read(tmp.path(), "src/index.css"), "@import 'bulma';\nbody {}\n");
    }

    #[test]
    fn test_prepend_to_missing_file_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let artifact = Artifact::new("src/index.css", "@import 'bulma';\n");
        let outcome = mutator
            .reconcile(&artifact, Mode::PrependUnlessMarked("bulma"))
            .unwrap();

        assert_eq!(outcome, Outcome::NoOpAbsent);
        assert!(!tmp.path().join("src/index.css").exists());
    }

    #[test]
    fn test_ensure_marked_skips_composition_when_marker_present() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/main.tsx"), "// QueryClientProvider by hand").unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        let outcome = mutator
            .ensure_marked(Path::new("src/main.tsx"), "QueryClientProvider", || {
                panic!("composer must not run")
            })
            .unwrap();

        assert_eq!(outcome, Outcome::SkippedAlreadyPresent);
    }

    #[test]
    fn test_unwrap_recomposes_only_when_marked() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/main.tsx"), "plain").unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);
        let path = Path::new("src/main.tsx");

        let untouched = mutator
            .unwrap(path, "MantineProvider", || panic!("nothing to unwrap"))
            .unwrap();
        assert_eq!(untouched, Outcome::NoOpAbsent);

        fs::write(tmp.path().join("src/main.tsx"), "<MantineProvider>").unwrap();
        let unwrapped = mutator
            .unwrap(path, "MantineProvider", || Artifact::new("src/main.tsx", "plain"))
            .unwrap();
        assert_eq!(unwrapped, Outcome::Written);
        assert_eq!(read(tmp.path(), "src/main.tsx"), "plain");
    }

    #[test]
    fn test_replace_if_owned() {
        let tmp = tempfile::tempdir().unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);
        let artifact = Artifact::new("netlify.toml", "pnpm\n").with_variants(vec!["bun\n".to_string()]);

        assert_eq!(mutator.reconcile(&artifact, Mode::ReplaceIfOwned).unwrap(), Outcome::Written);
        assert_eq!(
            mutator.reconcile(&artifact, Mode::ReplaceIfOwned).unwrap(),
            Outcome::SkippedAlreadyPresent
        );

        fs::write(tmp.path().join("netlify.toml"), "bun\n").unwrap();
        assert_eq!(mutator.reconcile(&artifact, Mode::ReplaceIfOwned).unwrap(), Outcome::Written);
        assert_eq!(read(tmp.path(), "netlify.toml"), "pnpm\n");

        fs::write(tmp.path().join("netlify.toml"), "custom\n").unwrap();
        assert_eq!(
            mutator.reconcile(&artifact, Mode::ReplaceIfOwned).unwrap(),
            Outcome::SkippedDiverged
        );
        assert_eq!(read(tmp.path(), "netlify.toml"), "custom\n");
    }

    #[test]
    fn test_remove_dir_if_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src/stores")).unwrap();
        fs::write(tmp.path().join("src/keep.ts"), "").unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);

        assert!(mutator.remove_dir_if_empty(Path::new("src/stores")).unwrap());
        assert!(!mutator.remove_dir_if_empty(Path::new("src")).unwrap());
        assert!(!mutator.remove_dir_if_empty(Path::new("missing")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_artifact_gets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let mutator = FileMutator::new(tmp.path(), &SubstringSniffer);
        let artifact = Artifact::new(".husky/pre-commit", "#!/bin/sh\n").executable();

        mutator.reconcile(&artifact, Mode::Overwrite).unwrap();
        let mode = fs::metadata(tmp.path().join(".husky/pre-commit"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
