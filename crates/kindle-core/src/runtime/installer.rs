//! Dependency installation through the project's package manager

use super::runner::{Invocation, ProcessRunner};
use crate::error::Result;
use crate::plan::Bundler;
use std::path::{Path, PathBuf};

/// Adds and removes packages in one project
pub trait DependencyInstaller {
    fn add_packages(&self, names: &[&str], dev: bool) -> Result<()>;
    fn remove_packages(&self, names: &[&str], dev: bool) -> Result<()>;
}

/// `pnpm install [-D]` / `bun add [-d]` and their removal counterparts
pub struct PackageInstaller<'a> {
    runner: &'a dyn ProcessRunner,
    bundler: Bundler,
    root: PathBuf,
}

impl<'a> PackageInstaller<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, bundler: Bundler, root: &Path) -> Self {
        Self {
            runner,
            bundler,
            root: root.to_path_buf(),
        }
    }

    fn add_args(&self, names: &[&str], dev: bool) -> Vec<String> {
        let mut args = Vec::with_capacity(names.len() + 2);
        match self.bundler {
            Bundler::Vite => {
                args.push("install".to_string());
                if dev {
                    args.push("-D".to_string());
                }
            }
            Bundler::Bun => {
                args.push("add".to_string());
                if dev {
                    args.push("-d".to_string());
                }
            }
        }
        args.extend(names.iter().map(|n| n.to_string()));
        args
    }

    fn remove_args(&self, names: &[&str], dev: bool) -> Vec<String> {
        let mut args = vec!["remove".to_string()];
        if dev && self.bundler == Bundler::Vite {
            args.push("-D".to_string());
        }
        args.extend(names.iter().map(|n| n.to_string()));
        args
    }

    fn run(&self, args: Vec<String>) -> Result<()> {
        let invocation = Invocation::new(self.bundler.package_manager(), args, &self.root);
        self.runner.run(&invocation).map(|_| ())
    }
}

impl DependencyInstaller for PackageInstaller<'_> {
    fn add_packages(&self, names: &[&str], dev: bool) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        self.run(self.add_args(names, dev))
    }

    fn remove_packages(&self, names: &[&str], dev: bool) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        self.run(self.remove_args(names, dev))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::runner::SystemRunner;

    fn installer(bundler: Bundler) -> PackageInstaller<'static> {
        PackageInstaller::new(&SystemRunner, bundler, Path::new("."))
    }

    #[test]
    fn test_pnpm_args() {
        let pnpm = installer(Bundler::Vite);
        assert_eq!(pnpm.add_args(&["zustand"], false), vec!["install", "zustand"]);
        assert_eq!(pnpm.add_args(&["eslint"], true), vec!["install", "-D", "eslint"]);
        assert_eq!(pnpm.remove_args(&["eslint"], true), vec!["remove", "-D", "eslint"]);
    }

    #[test]
    fn test_bun_args() {
        let bun = installer(Bundler::Bun);
        assert_eq!(bun.add_args(&["eslint"], true), vec!["add", "-d", "eslint"]);
        assert_eq!(bun.remove_args(&["eslint"], true), vec!["remove", "eslint"]);
    }
}
