//! `kindle.yaml` settings and their merge with command-line flags

use crate::error::{Result, ScaffoldError};
use crate::plan::{Bundler, Plan};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "kindle.yaml";
pub const SETTINGS_ENV: &str = "KINDLE_CONFIG";
pub const QUIET_ENV: &str = "KINDLE_QUIET";

/// Stack defaults for `new` when no flag says otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureDefaults {
    pub bundler: Bundler,
    pub mantine: bool,
    pub tailwind: bool,
    pub react_query: bool,
    pub zustand: bool,
    pub eslint: bool,
    pub prettier: bool,
    pub husky: bool,
    pub framer_motion: bool,
    pub docker: bool,
    pub vercel: bool,
    pub netlify: bool,
    pub storybook: bool,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            bundler: Bundler::Vite,
            mantine: false,
            tailwind: true,
            react_query: true,
            zustand: true,
            eslint: true,
            prettier: true,
            husky: true,
            framer_motion: true,
            docker: false,
            vercel: false,
            netlify: false,
            storybook: false,
        }
    }
}

/// User settings (settings file + environment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Plain output without spinners
    pub quiet: bool,

    /// Launch the dev server at the end of `new`
    pub start_dev_server: bool,

    #[serde(default)]
    pub defaults: FeatureDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quiet: false,
            start_dev_server: true,
            defaults: FeatureDefaults::default(),
        }
    }
}

/// `new` flags as given on the command line
///
/// Opt-in flags can only turn a stack on and opt-out flags can only turn it
/// off; anything not mentioned falls back to [`FeatureDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub bundler: Option<Bundler>,
    pub mantine: bool,
    pub styled: bool,
    pub docker: bool,
    pub vercel: bool,
    pub netlify: bool,
    pub storybook: bool,
    pub backend: bool,
    pub no_tailwind: bool,
    pub no_react_query: bool,
    pub no_zustand: bool,
    pub no_eslint: bool,
    pub no_prettier: bool,
    pub no_husky: bool,
    pub no_framer_motion: bool,
}

impl Settings {
    /// Load settings from the environment and the first settings file found.
    ///
    /// Lookup order: `explicit`, then `$KINDLE_CONFIG`, then `kindle.yaml` in
    /// `cwd`. A missing file is only an error when it was named explicitly.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Settings> {
        Self::load_with_env(explicit, cwd, |key| std::env::var(key).ok())
    }

    pub fn load_with_env<E>(explicit: Option<&Path>, cwd: &Path, env: E) -> Result<Settings>
    where
        E: Fn(&str) -> Option<String>,
    {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(SETTINGS_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));

        let mut settings = match named {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = cwd.join(SETTINGS_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Settings::default()
                }
            }
        };

        if let Some(value) = env(QUIET_ENV) {
            settings.quiet = matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Settings> {
        let content =
            fs::read_to_string(path).map_err(|e| ScaffoldError::io("Failed to read", path, e))?;
        let settings = Self::parse(&content).map_err(|source| ScaffoldError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn parse(content: &str) -> std::result::Result<Settings, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(content)
    }

    /// Requested plan for `new <name>`; not yet validated
    pub fn requested_plan(&self, name: &str, flags: &FeatureFlags) -> Plan {
        let d = &self.defaults;
        Plan {
            name: name.to_string(),
            bundler: flags.bundler.unwrap_or(d.bundler),
            mantine: flags.mantine || d.mantine,
            tailwind: d.tailwind && !flags.no_tailwind,
            react_query: d.react_query && !flags.no_react_query,
            zustand: d.zustand && !flags.no_zustand,
            eslint: d.eslint && !flags.no_eslint,
            prettier: d.prettier && !flags.no_prettier,
            husky: d.husky && !flags.no_husky,
            framer_motion: d.framer_motion && !flags.no_framer_motion,
            styled: flags.styled,
            docker: flags.docker || d.docker,
            vercel: flags.vercel || d.vercel,
            netlify: flags.netlify || d.netlify,
            storybook: flags.storybook || d.storybook,
            backend: flags.backend,
        }
    }
}
