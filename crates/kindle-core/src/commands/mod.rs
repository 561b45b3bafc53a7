//! Command dispatch
//!
//! Every command follows the same linear path: validate input, build or
//! detect a plan, compose artifacts, reconcile files, call the package
//! manager, report. Any step may fail; nothing is retried and nothing already
//! done is rolled back.

pub mod add;
pub mod lint;
pub mod new;
pub mod remove;

pub use add::run_add;
pub use lint::run_lint;
pub use new::run_new;
pub use remove::run_remove;

use crate::error::{Result, ScaffoldError};
use crate::plan::{Bundler, Plan};
use crate::project::{ContentSniffer, Detector, FileChange, FileMutator, Mode, Outcome};
use crate::report::{in_task, Reporter};
use crate::runtime::{DependencyInstaller, PackageInstaller, ProcessRunner};
use crate::stack::PackageGroup;
use crate::templates::lint::{lint_artifact, matching_variant, ESLINT_CONFIG_FILE};
use crate::templates::Artifact;
use std::path::{Path, PathBuf};

/// Collaborators shared by all commands
#[derive(Clone, Copy)]
pub struct Session<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub reporter: &'a dyn Reporter,
    pub sniffer: &'a dyn ContentSniffer,
}

impl<'a> Session<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        reporter: &'a dyn Reporter,
        sniffer: &'a dyn ContentSniffer,
    ) -> Self {
        Self {
            runner,
            reporter,
            sniffer,
        }
    }

    fn mutator<'r>(&self, root: &'r Path) -> FileMutator<'r>
    where
        'a: 'r,
    {
        FileMutator::new(root, self.sniffer)
    }

    fn installer(&self, bundler: Bundler, root: &Path) -> PackageInstaller<'a> {
        PackageInstaller::new(self.runner, bundler, root)
    }

    fn install(&self, installer: &dyn DependencyInstaller, group: &PackageGroup) -> Result<()> {
        in_task(
            self.reporter,
            &format!("Installing {}", group.label),
            &format!("Installed {}", group.label),
            || installer.add_packages(group.packages, group.dev),
        )
    }

    fn uninstall(&self, installer: &dyn DependencyInstaller, group: &PackageGroup) -> Result<()> {
        in_task(
            self.reporter,
            &format!("Removing {}", group.label),
            &format!("Removed {}", group.label),
            || installer.remove_packages(&group.names(), group.dev),
        )
    }

    /// Reconcile one artifact, record it and report the outcome
    fn apply(
        &self,
        mutator: &FileMutator<'_>,
        summary: &mut Summary,
        artifact: &Artifact,
        mode: Mode<'_>,
    ) -> Result<Outcome> {
        let outcome = mutator.reconcile(artifact, mode)?;
        self.record(summary, &artifact.path, outcome);
        Ok(outcome)
    }

    fn record(&self, summary: &mut Summary, path: &Path, outcome: Outcome) {
        let shown = path.display();
        match outcome {
            Outcome::Written => self.reporter.success(&format!("Wrote {}", shown)),
            Outcome::Deleted => self.reporter.success(&format!("Deleted {}", shown)),
            Outcome::SkippedDiverged => self.reporter.warning(&format!(
                "{} differs from the generated version; left untouched",
                shown
            )),
            Outcome::SkippedAlreadyPresent => {
                self.reporter.info(&format!("{} already up to date", shown))
            }
            Outcome::NoOpAbsent => {}
        }
        summary.push(path, outcome);
    }

    /// Re-derive `eslint.config.js` after a provider stack changed.
    ///
    /// Only a config that is byte-identical to a preset composed for `before`
    /// is rewritten, keeping the same preset.
    fn refresh_lint(
        &self,
        mutator: &FileMutator<'_>,
        summary: &mut Summary,
        before: &Plan,
        after: &Plan,
    ) -> Result<()> {
        let path = Path::new(ESLINT_CONFIG_FILE);
        let Some(current) = mutator.read_to_string(path)? else {
            return Ok(());
        };

        if let Some(variant) = matching_variant(before, current.as_bytes()) {
            let artifact = lint_artifact(after, variant);
            if artifact.content == current {
                self.record(summary, path, Outcome::SkippedAlreadyPresent);
            } else {
                self.apply(mutator, summary, &artifact, Mode::Overwrite)?;
            }
        } else if matching_variant(after, current.as_bytes()).is_none() {
            self.reporter.warning(&format!(
                "{} was customised; update its plugins by hand if needed",
                ESLINT_CONFIG_FILE
            ));
            summary.push(path, Outcome::SkippedDiverged);
        }
        Ok(())
    }
}

/// Fail unless the plan's entry file exists below the detector's root
fn require_entry(detector: &Detector<'_>, plan: &Plan) -> Result<()> {
    if detector.exists(plan.entry_path()) {
        Ok(())
    } else {
        Err(ScaffoldError::MissingPrerequisite(format!(
            "{} not found. Run this inside a scaffolded {} project",
            plan.entry_path().display(),
            plan.bundler
        )))
    }
}

/// Every file a command touched, in order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub changes: Vec<FileChange>,
}

impl Summary {
    fn push(&mut self, path: &Path, outcome: Outcome) {
        self.changes.push(FileChange {
            path: path.to_path_buf(),
            outcome,
        });
    }

    /// Last recorded outcome for `path`
    pub fn outcome_of(&self, path: impl AsRef<Path>) -> Option<Outcome> {
        let path = path.as_ref();
        self.changes
            .iter()
            .rev()
            .find(|change| change.path == path)
            .map(|change| change.outcome)
    }

    /// Paths whose content actually changed on disk
    pub fn changed_paths(&self) -> Vec<PathBuf> {
        self.changes
            .iter()
            .filter(|change| change.outcome.changed())
            .map(|change| change.path.clone())
            .collect()
    }
}
