//! Feature plan: the resolved stack selection for one command invocation

use crate::error::{Result, ScaffoldError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Build-tool convention used by a project
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Bundler {
    #[default]
    Vite,
    Bun,
}

impl Bundler {
    pub fn display_name(&self) -> &'static str {
        match self {
            Bundler::Vite => "Vite",
            Bundler::Bun => "Bun",
        }
    }

    /// Package manager binary driving installs and scripts
    pub fn package_manager(&self) -> &'static str {
        match self {
            Bundler::Vite => "pnpm",
            Bundler::Bun => "bun",
        }
    }

    /// Conventional name of the browser entry file under `src/`
    pub fn entry_filename(&self) -> &'static str {
        match self {
            Bundler::Vite => "main.tsx",
            Bundler::Bun => "frontend.tsx",
        }
    }

    /// Port the dev server listens on
    pub fn dev_port(&self) -> u16 {
        match self {
            Bundler::Vite => 5173,
            Bundler::Bun => 3000,
        }
    }

    /// Command prefix for one-off package binaries (`pnpm dlx`, `bunx`)
    pub fn package_runner(&self) -> &'static str {
        match self {
            Bundler::Vite => "pnpm dlx",
            Bundler::Bun => "bunx",
        }
    }

    pub fn all() -> [Bundler; 2] {
        [Bundler::Vite, Bundler::Bun]
    }
}

impl fmt::Display for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Requested (or detected) stack selection
///
/// Built once per invocation, either from CLI flags through [`Plan::build`] or
/// from on-disk evidence by the detector. Never mutated afterwards; the
/// `with_*` helpers return modified copies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub name: String,
    pub bundler: Bundler,
    pub mantine: bool,
    pub tailwind: bool,
    pub react_query: bool,
    pub zustand: bool,
    pub eslint: bool,
    pub prettier: bool,
    pub husky: bool,
    pub framer_motion: bool,
    /// Styled Mantine `App.tsx`; only valid together with `mantine`
    pub styled: bool,
    pub docker: bool,
    pub vercel: bool,
    pub netlify: bool,
    pub storybook: bool,
    /// Bun API server in `backend/`; Vite projects only
    pub backend: bool,
}

impl Plan {
    /// Validate a requested plan for scaffolding into `base_dir/<name>`.
    ///
    /// Checks run before anything touches the disk.
    pub fn build(self, base_dir: &Path) -> Result<Plan> {
        validate_name(&self.name)?;
        self.validate()?;

        let project_dir = base_dir.join(&self.name);
        if project_dir.exists() {
            return Err(ScaffoldError::AlreadyExists(PathBuf::from(&self.name)));
        }

        Ok(self)
    }

    /// Check flag invariants that hold regardless of the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.styled && !self.mantine {
            return Err(ScaffoldError::InputValidation(
                "--styled requires --mantine".to_string(),
            ));
        }
        if self.backend && self.bundler != Bundler::Vite {
            return Err(ScaffoldError::InputValidation(
                "--backend is only available for Vite projects; Bun serves its own API routes"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_vite(&self) -> bool {
        self.bundler == Bundler::Vite
    }

    pub fn is_bun(&self) -> bool {
        self.bundler == Bundler::Bun
    }

    pub fn package_manager(&self) -> &'static str {
        self.bundler.package_manager()
    }

    pub fn entry_filename(&self) -> &'static str {
        self.bundler.entry_filename()
    }

    /// Entry file path relative to the project root
    pub fn entry_path(&self) -> PathBuf {
        Path::new("src").join(self.entry_filename())
    }

    pub fn with_mantine(&self, enabled: bool) -> Plan {
        Plan {
            mantine: enabled,
            styled: self.styled && enabled,
            ..self.clone()
        }
    }

    pub fn with_react_query(&self, enabled: bool) -> Plan {
        Plan {
            react_query: enabled,
            ..self.clone()
        }
    }
}

/// Check that a project name is usable as a directory and npm package name
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ScaffoldError::InputValidation(
            "Project name cannot be empty".to_string(),
        ));
    }

    let invalid = || ScaffoldError::InputValidation(format!("Invalid project name: \"{}\"", name));

    if name.contains("..") || name.starts_with('.') || name.starts_with('-') {
        return Err(invalid());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(invalid());
    }
    Ok(())
}
