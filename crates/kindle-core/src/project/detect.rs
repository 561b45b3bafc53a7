//! Recover an implicit feature plan from an existing project directory
//!
//! Detection runs from scratch on every invocation; nothing is cached.

use super::sniff::ContentSniffer;
use crate::error::{Result, ScaffoldError};
use crate::plan::{Bundler, Plan};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Project manifest at the root of every scaffolded app
pub const MANIFEST_FILE: &str = "package.json";

const VITE_CONFIGS: &[&str] = &["vite.config.ts", "vite.config.js", "vite.config.mjs"];
const BUN_MARKERS: &[&str] = &["bunfig.toml", "bun.lock", "bun-env.d.ts"];
const TAILWIND_CONFIGS: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.ts",
];

/// Sniffed package names per stack
pub mod packages {
    pub const MANTINE: &str = "@mantine/core";
    pub const REACT_QUERY: &str = "@tanstack/react-query";
    pub const ZUSTAND: &str = "\"zustand\"";
    pub const TAILWIND: &str = "tailwindcss";
    pub const ESLINT: &str = "\"eslint\"";
    pub const PRETTIER: &str = "\"prettier\"";
    pub const HUSKY: &str = "\"husky\"";
    pub const FRAMER_MOTION: &str = "framer-motion";
    pub const STORYBOOK: &str = "\"storybook\"";
}

/// Inspects a project root: marker files plus manifest content
pub struct Detector<'a> {
    root: &'a Path,
    sniffer: &'a dyn ContentSniffer,
    manifest: Option<Vec<u8>>,
}

impl<'a> Detector<'a> {
    /// Open a project root, reading the manifest if one exists
    pub fn new(root: &'a Path, sniffer: &'a dyn ContentSniffer) -> Result<Self> {
        let manifest_path = root.join(MANIFEST_FILE);
        let manifest = match fs::read(&manifest_path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(ScaffoldError::io("Failed to read", manifest_path, e)),
        };

        Ok(Self {
            root,
            sniffer,
            manifest,
        })
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }

    /// Fail unless the root holds a manifest
    pub fn require_manifest(&self) -> Result<()> {
        if self.has_manifest() {
            Ok(())
        } else {
            Err(ScaffoldError::MissingPrerequisite(format!(
                "{} not found. Run this inside your existing app directory",
                MANIFEST_FILE
            )))
        }
    }

    /// Whether `package` appears anywhere in the manifest
    pub fn has_dependency(&self, package: &str) -> bool {
        self.manifest
            .as_deref()
            .is_some_and(|bytes| self.sniffer.contains(bytes, package))
    }

    /// Whether the file (or directory) at `relative` exists under the root
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.root.join(relative).exists()
    }

    fn any_exists(&self, candidates: &[&str]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(PathBuf::from)
            .find(|candidate| self.exists(candidate))
    }

    /// Determine the bundler.
    ///
    /// Precedence: Vite config > Bun markers > error.
    pub fn detect_bundler(&self) -> Result<Bundler> {
        if let Some(config) = self.any_exists(VITE_CONFIGS) {
            tracing::debug!(marker = %config.display(), "detected Vite project");
            return Ok(Bundler::Vite);
        }

        if let Some(marker) = self.any_exists(BUN_MARKERS) {
            tracing::debug!(marker = %marker.display(), "detected Bun project");
            return Ok(Bundler::Bun);
        }

        Err(ScaffoldError::Detection(
            "No bundler detected: run this command from a scaffolded project root".to_string(),
        ))
    }

    /// Tailwind is present as a package or through a config file
    pub fn has_tailwind(&self) -> bool {
        self.has_dependency(packages::TAILWIND) || self.any_exists(TAILWIND_CONFIGS).is_some()
    }

    /// Reconstruct the plan a project was (most likely) scaffolded with.
    ///
    /// The styled App variant leaves no trace and is always reported off.
    pub fn detect_plan(&self) -> Result<Plan> {
        let bundler = self.detect_bundler()?;
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let plan = Plan {
            name,
            bundler,
            mantine: self.has_dependency(packages::MANTINE),
            tailwind: self.has_tailwind(),
            react_query: self.has_dependency(packages::REACT_QUERY),
            zustand: self.has_dependency(packages::ZUSTAND),
            eslint: self.has_dependency(packages::ESLINT),
            prettier: self.has_dependency(packages::PRETTIER),
            husky: self.has_dependency(packages::HUSKY),
            framer_motion: self.has_dependency(packages::FRAMER_MOTION),
            styled: false,
            docker: self.exists("Dockerfile"),
            vercel: self.exists("vercel.json"),
            netlify: self.exists("netlify.toml"),
            storybook: self.has_dependency(packages::STORYBOOK) || self.exists(".storybook"),
            backend: self.exists(Path::new("backend").join("index.ts")),
        };

        tracing::debug!(?plan, "detected plan");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::sniff::SubstringSniffer;

    fn touch(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_vite_config_wins_over_bun_markers() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "vite.config.ts", "");
        touch(tmp.path(), "bun.lock", "");

        let detector = Detector::new(tmp.path(), &SubstringSniffer).unwrap();
        assert_eq!(detector.detect_bundler().unwrap(), Bundler::Vite);
    }

    #[test]
    fn test_bun_markers_detected() {
        for marker in BUN_MARKERS {
            let tmp = tempfile::tempdir().unwrap();
            touch(tmp.path(), marker, "");

            let detector = Detector::new(tmp.path(), &SubstringSniffer).unwrap();
            assert_eq!(detector.detect_bundler().unwrap(), Bundler::Bun);
        }
    }

    #[test]
    fn test_no_bundler_is_detection_error() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), MANIFEST_FILE, "{}");

        let detector = Detector::new(tmp.path(), &SubstringSniffer).unwrap();
        assert!(matches!(
            detector.detect_bundler(),
            Err(ScaffoldError::Detection(_))
        ));
    }

    #[test]
    fn test_missing_manifest_is_prerequisite_error() {
        let tmp = tempfile::tempdir().unwrap();
        let detector = Detector::new(tmp.path(), &SubstringSniffer).unwrap();
        assert!(!detector.has_dependency(packages::MANTINE));
        assert!(matches!(
            detector.require_manifest(),
            Err(ScaffoldError::MissingPrerequisite(_))
        ));
    }

    #[test]
    fn test_detect_plan_from_manifest_and_files() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "vite.config.ts", "");
        touch(
            tmp.path(),
            MANIFEST_FILE,
            r#"{
  "dependencies": { "@tanstack/react-query": "^5.0.0", "zustand": "^5.0.0" },
  "devDependencies": { "eslint": "^9.0.0", "tailwindcss": "^4.0.0" }
}"#,
        );
        touch(tmp.path(), "netlify.toml", "");

        let detector = Detector::new(tmp.path(), &SubstringSniffer).unwrap();
        let plan = detector.detect_plan().unwrap();

        assert_eq!(plan.bundler, Bundler::Vite);
        assert!(plan.react_query);
        assert!(plan.zustand);
        assert!(plan.eslint);
        assert!(plan.tailwind);
        assert!(plan.netlify);
        assert!(!plan.mantine);
        assert!(!plan.prettier);
        assert!(!plan.docker);
        assert!(!plan.styled);
    }

    #[test]
    fn test_tailwind_config_file_counts() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), MANIFEST_FILE, "{}");
        touch(tmp.path(), "tailwind.config.js", "");

        let detector = Detector::new(tmp.path(), &SubstringSniffer).unwrap();
        assert!(detector.has_tailwind());
    }
}
