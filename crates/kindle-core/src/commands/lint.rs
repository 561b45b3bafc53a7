//! `lint relax` / `lint reset`: switch `eslint.config.js` between presets

use super::{Session, Summary};
use crate::error::{Result, ScaffoldError};
use crate::project::{Detector, Mode};
use crate::templates::lint::{lint_artifact, LintVariant, ESLINT_CONFIG_FILE};
use std::path::Path;

/// Rewrite the lint config with `variant`, composed for the detected plan.
///
/// `relax` only makes sense on top of an existing config; `reset` also
/// recreates a deleted one.
pub fn run_lint(session: &Session<'_>, root: &Path, variant: LintVariant) -> Result<Summary> {
    let detector = Detector::new(root, session.sniffer)?;

    if variant == LintVariant::Relaxed && !detector.exists(ESLINT_CONFIG_FILE) {
        return Err(ScaffoldError::MissingPrerequisite(format!(
            "{} not found. Run this inside a scaffolded project with ESLint configured",
            ESLINT_CONFIG_FILE
        )));
    }

    let plan = detector.detect_plan()?;
    let mutator = session.mutator(root);
    let mut summary = Summary::default();

    session.reporter.intro(match variant {
        LintVariant::Relaxed => "kindle lint relax",
        LintVariant::Strict => "kindle lint reset",
    });

    session.apply(&mutator, &mut summary, &lint_artifact(&plan, variant), Mode::Overwrite)?;

    session.reporter.outro(match variant {
        LintVariant::Relaxed => {
            "ESLint relaxed: unicorn removed, import ordering rules off, core recommended rules kept"
        }
        LintVariant::Strict => "ESLint reset to the strict preset",
    });
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{read, write, Fixture};
    use crate::plan::{Bundler, Plan};
    use crate::project::Outcome;
    use crate::templates::lint::compose_lint_config;

    #[test]
    fn test_relax_then_reset() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "vite.config.ts", "");
        write(tmp.path(), "package.json", r#"{ "dependencies": { "@tanstack/react-query": "^5" } }"#);
        write(tmp.path(), "eslint.config.js", "export default [];\n");
        let fixture = Fixture::new();
        let plan = Plan {
            react_query: true,
            ..Plan::default()
        };

        let summary = run_lint(&fixture.session(), tmp.path(), LintVariant::Relaxed).unwrap();
        assert_eq!(summary.outcome_of("eslint.config.js"), Some(Outcome::Written));
        let relaxed = read(tmp.path(), "eslint.config.js");
        assert_eq!(relaxed, compose_lint_config(&plan, LintVariant::Relaxed));
        assert!(!relaxed.contains("unicorn"));
        assert!(relaxed.contains("tanstackQuery"));

        run_lint(&fixture.session(), tmp.path(), LintVariant::Strict).unwrap();
        assert_eq!(
            read(tmp.path(), "eslint.config.js"),
            compose_lint_config(&plan, LintVariant::Strict)
        );
        assert!(fixture.runner.commands().is_empty());
    }

    #[test]
    fn test_relax_requires_config() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "vite.config.ts", "");
        let fixture = Fixture::new();

        let result = run_lint(&fixture.session(), tmp.path(), LintVariant::Relaxed);
        assert!(matches!(result, Err(ScaffoldError::MissingPrerequisite(_))));
        assert!(!tmp.path().join("eslint.config.js").exists());
    }

    #[test]
    fn test_reset_recreates_config_for_bun() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "bunfig.toml", "");
        let fixture = Fixture::new();

        run_lint(&fixture.session(), tmp.path(), LintVariant::Strict).unwrap();

        let bun = Plan {
            bundler: Bundler::Bun,
            ..Plan::default()
        };
        assert_eq!(
            read(tmp.path(), "eslint.config.js"),
            compose_lint_config(&bun, LintVariant::Strict)
        );
    }

    #[test]
    fn test_lint_outside_project_is_detection_error() {
        let tmp = tempfile::tempdir().unwrap();
        let fixture = Fixture::new();

        let result = run_lint(&fixture.session(), tmp.path(), LintVariant::Strict);
        assert!(matches!(result, Err(ScaffoldError::Detection(_))));
    }
}
