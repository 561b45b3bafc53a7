//! `add <stack>`: turn one optional stack on in an existing project

use super::{require_entry, Session, Summary};
use crate::error::{Result, ScaffoldError};
use crate::plan::Plan;
use crate::project::{Detector, FileMutator, Mode, Outcome};
use crate::runtime::{require_tool, Invocation};
use crate::stack::Stack;
use crate::templates::entry::{entry_artifact, MANTINE_PROVIDER_MARKER, QUERY_PROVIDER_MARKER};
use crate::templates::{app, config, deploy, storybook};
use std::path::Path;

const SHADCN_CONFIG: &str = "components.json";

pub fn run_add(session: &Session<'_>, root: &Path, stack: Stack, styled: bool) -> Result<Summary> {
    if styled {
        return Err(ScaffoldError::InputValidation(
            "--styled is only available when scaffolding (kindle new --mantine --styled); \
             add leaves src/App.tsx alone"
                .to_string(),
        ));
    }

    let detector = Detector::new(root, session.sniffer)?;
    let plan = detector.detect_plan()?;
    let mutator = session.mutator(root);
    let mut summary = Summary::default();

    session.reporter.intro(&format!("kindle add {}", stack));

    if matches!(stack, Stack::Mantine | Stack::ReactQuery) {
        require_entry(&detector, &plan)?;
    }
    if !stack.package_groups().is_empty() || stack == Stack::Shadcn {
        detector.require_manifest()?;
        require_tool(session.runner, plan.package_manager(), root)?;
    }

    match stack {
        Stack::Mantine => {
            install(session, &plan, root, stack)?;
            session.apply(&mutator, &mut summary, &config::postcss_artifact(), Mode::Overwrite)?;
            wire_provider(session, &mutator, &mut summary, &plan, &plan.with_mantine(true), MANTINE_PROVIDER_MARKER)?;
        }
        Stack::ReactQuery => {
            install(session, &plan, root, stack)?;
            wire_provider(session, &mutator, &mut summary, &plan, &plan.with_react_query(true), QUERY_PROVIDER_MARKER)?;
        }
        Stack::Zustand => {
            install(session, &plan, root, stack)?;
            session.apply(&mutator, &mut summary, &app::store_artifact(), Mode::CreateIfAbsent)?;
        }
        Stack::FramerMotion => {
            install(session, &plan, root, stack)?;
        }
        Stack::Bulma => {
            install(session, &plan, root, stack)?;
            let import = app::bulma_import_artifact();
            let outcome = session.apply(
                &mutator,
                &mut summary,
                &import,
                Mode::PrependUnlessMarked(app::BULMA_IMPORT_MARKER),
            )?;
            if outcome == Outcome::NoOpAbsent {
                session.reporter.warning(&format!(
                    "{} not found; add `{}` to your global CSS",
                    import.path.display(),
                    import.content.trim_end()
                ));
            }
        }
        Stack::Shadcn => add_shadcn(session, &detector, &plan, root)?,
        Stack::Storybook => add_storybook(session, &detector, &mutator, &mut summary, &plan, root)?,
        Stack::Docker => {
            for artifact in [deploy::dockerfile_artifact(&plan), deploy::compose_artifact(&plan)] {
                session.apply(&mutator, &mut summary, &artifact, Mode::ReplaceIfOwned)?;
            }
        }
        Stack::Vercel => {
            session.apply(&mutator, &mut summary, &deploy::vercel_artifact(&plan), Mode::ReplaceIfOwned)?;
        }
        Stack::Netlify => {
            session.apply(&mutator, &mut summary, &deploy::netlify_artifact(&plan), Mode::ReplaceIfOwned)?;
        }
    }

    session.reporter.outro(&format!("{} added. src/App.tsx left untouched.", stack));
    Ok(summary)
}

fn install(session: &Session<'_>, plan: &Plan, root: &Path, stack: Stack) -> Result<()> {
    let installer = session.installer(plan.bundler, root);
    for group in stack.package_groups() {
        session.install(&installer, group)?;
    }
    Ok(())
}

/// Recompose the entry file with a provider unless it is already wired in,
/// then bring the lint config along
fn wire_provider(
    session: &Session<'_>,
    mutator: &FileMutator<'_>,
    summary: &mut Summary,
    before: &Plan,
    after: &Plan,
    marker: &str,
) -> Result<()> {
    let path = after.entry_path();
    let outcome = mutator.ensure_marked(&path, marker, || entry_artifact(after))?;
    session.record(summary, &path, outcome);
    if outcome == Outcome::SkippedAlreadyPresent {
        session
            .reporter
            .info(&format!("{} already wired into {}; leaving it unchanged", marker, path.display()));
    }

    session.refresh_lint(mutator, summary, before, after)
}

fn add_shadcn(session: &Session<'_>, detector: &Detector<'_>, plan: &Plan, root: &Path) -> Result<()> {
    if !detector.has_tailwind() {
        return Err(ScaffoldError::MissingPrerequisite(
            "Tailwind not detected. shadcn/ui requires Tailwind; install Tailwind first".to_string(),
        ));
    }

    let runner = plan.bundler.package_runner();
    if detector.exists(SHADCN_CONFIG) {
        session.reporter.warning(&format!(
            "{} already exists; shadcn/ui looks initialized. Skipping init.",
            SHADCN_CONFIG
        ));
        session
            .reporter
            .info(&format!("Use `{} shadcn-ui@latest add <component>` to add components", runner));
        return Ok(());
    }

    session
        .reporter
        .info("Running shadcn-ui init (you'll see prompts for theme and config)...");
    let init = Invocation::from_command_line(runner, ["shadcn-ui@latest", "init"], root).streamed();
    session.runner.run(&init)?;
    session.reporter.info(&format!(
        "shadcn/ui initialized. Add components with `{} shadcn-ui@latest add button card input`",
        runner
    ));
    Ok(())
}

fn add_storybook(
    session: &Session<'_>,
    detector: &Detector<'_>,
    mutator: &FileMutator<'_>,
    summary: &mut Summary,
    plan: &Plan,
    root: &Path,
) -> Result<()> {
    if detector.exists(storybook::STORYBOOK_DIR) {
        session.reporter.warning(&format!(
            "{} already exists; skipping Storybook setup",
            storybook::STORYBOOK_DIR
        ));
        return Ok(());
    }

    install(session, plan, root, Stack::Storybook)?;

    let import_css = detector.exists(Path::new("src").join("index.css"));
    session.apply(mutator, summary, &storybook::main_artifact(), Mode::Overwrite)?;
    session.apply(mutator, summary, &storybook::preview_artifact(import_css), Mode::Overwrite)?;
    session.apply(mutator, summary, &storybook::story_artifact(), Mode::CreateIfAbsent)?;

    session
        .reporter
        .info(&format!("Run Storybook with `{}`", storybook::run_command(plan)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{read, write, Fixture};
    use crate::plan::Bundler;
    use crate::templates::compose_entry_file;
    use crate::templates::lint::{compose_lint_config, LintVariant};

    const QUERY_MANIFEST: &str = r#"{ "dependencies": { "@tanstack/react-query": "^5.0.0" } }"#;

    fn vite_project(manifest: &str, plan: &Plan) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "package.json", manifest);
        write(tmp.path(), "vite.config.ts", "");
        write(tmp.path(), "src/main.tsx", &compose_entry_file(plan));
        tmp
    }

    fn query_plan() -> Plan {
        Plan {
            react_query: true,
            ..Plan::default()
        }
    }

    #[test]
    fn test_add_mantine_twice_is_idempotent() {
        let tmp = vite_project(QUERY_MANIFEST, &query_plan());
        let fixture = Fixture::new();

        let first = run_add(&fixture.session(), tmp.path(), Stack::Mantine, false).unwrap();
        let after_first = read(tmp.path(), "src/main.tsx");
        let second = run_add(&fixture.session(), tmp.path(), Stack::Mantine, false).unwrap();

        assert_eq!(first.outcome_of("src/main.tsx"), Some(Outcome::Written));
        assert_eq!(second.outcome_of("src/main.tsx"), Some(Outcome::SkippedAlreadyPresent));
        assert_eq!(read(tmp.path(), "src/main.tsx"), after_first);
        assert_eq!(after_first.matches("<MantineProvider>").count(), 1);
    }

    #[test]
    fn test_add_mantine_installs_packages_and_postcss() {
        let tmp = vite_project(QUERY_MANIFEST, &query_plan());
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Mantine, false).unwrap();

        let commands = fixture.runner.commands();
        assert!(commands.iter().any(|c| c.starts_with("pnpm install @mantine/core@latest")));
        assert!(commands.iter().any(|c| c.starts_with("pnpm install -D postcss@latest")));
        assert!(tmp.path().join("postcss.config.cjs").exists());
    }

    #[test]
    fn test_add_refreshes_generated_lint_config() {
        let before = query_plan();
        let tmp = vite_project(QUERY_MANIFEST, &before);
        write(tmp.path(), "eslint.config.js", &compose_lint_config(&before, LintVariant::Relaxed));
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Mantine, false).unwrap();

        assert_eq!(
            read(tmp.path(), "eslint.config.js"),
            compose_lint_config(&before.with_mantine(true), LintVariant::Relaxed)
        );
    }

    #[test]
    fn test_add_keeps_customised_lint_config() {
        let tmp = vite_project(QUERY_MANIFEST, &query_plan());
        write(tmp.path(), "eslint.config.js", "export default [];\n");
        let fixture = Fixture::new();

        let summary = run_add(&fixture.session(), tmp.path(), Stack::ReactQuery, false).unwrap();

        assert_eq!(read(tmp.path(), "eslint.config.js"), "export default [];\n");
        assert_eq!(summary.outcome_of("eslint.config.js"), Some(Outcome::SkippedDiverged));
    }

    #[test]
    fn test_add_styled_rejected() {
        let tmp = vite_project(QUERY_MANIFEST, &query_plan());
        let fixture = Fixture::new();

        let result = run_add(&fixture.session(), tmp.path(), Stack::Mantine, true);
        assert!(matches!(result, Err(ScaffoldError::InputValidation(_))));
        assert!(fixture.runner.commands().is_empty());
    }

    #[test]
    fn test_add_requires_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "vite.config.ts", "");
        let fixture = Fixture::new();

        let result = run_add(&fixture.session(), tmp.path(), Stack::Zustand, false);
        assert!(matches!(result, Err(ScaffoldError::MissingPrerequisite(_))));
    }

    #[test]
    fn test_add_outside_project_is_detection_error() {
        let tmp = tempfile::tempdir().unwrap();
        let fixture = Fixture::new();

        let result = run_add(&fixture.session(), tmp.path(), Stack::Docker, false);
        assert!(matches!(result, Err(ScaffoldError::Detection(_))));
    }

    #[test]
    fn test_add_zustand_keeps_existing_store() {
        let tmp = vite_project("{}", &Plan::default());
        write(tmp.path(), "src/stores/useAppStore.ts", "// mine\n");
        let fixture = Fixture::new();

        let summary = run_add(&fixture.session(), tmp.path(), Stack::Zustand, false).unwrap();

        assert_eq!(read(tmp.path(), "src/stores/useAppStore.ts"), "// mine\n");
        assert_eq!(
            summary.outcome_of("src/stores/useAppStore.ts"),
            Some(Outcome::SkippedAlreadyPresent)
        );
    }

    #[test]
    fn test_add_bulma_prepends_import_once() {
        let tmp = vite_project("{}", &Plan::default());
        write(tmp.path(), "src/index.css", "body {}\n");
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Bulma, false).unwrap();
        run_add(&fixture.session(), tmp.path(), Stack::Bulma, false).unwrap();

        assert_eq!(
            read(tmp.path(), "src/index.css"),
            "@import 'bulma/css/bulma.min.css';\nbody {}\n"
        );
    }

    #[test]
    fn test_add_bulma_without_stylesheet_warns() {
        let tmp = vite_project("{}", &Plan::default());
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Bulma, false).unwrap();

        assert!(!tmp.path().join("src/index.css").exists());
        assert_eq!(fixture.reporter.warnings().len(), 1);
    }

    #[test]
    fn test_add_shadcn_requires_tailwind() {
        let tmp = vite_project("{}", &Plan::default());
        let fixture = Fixture::new();

        let result = run_add(&fixture.session(), tmp.path(), Stack::Shadcn, false);
        assert!(matches!(result, Err(ScaffoldError::MissingPrerequisite(_))));
    }

    #[test]
    fn test_add_shadcn_streams_init() {
        let tmp = vite_project(r#"{ "devDependencies": { "tailwindcss": "^4" } }"#, &Plan::default());
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Shadcn, false).unwrap();
        assert!(fixture
            .runner
            .commands()
            .contains(&"pnpm dlx shadcn-ui@latest init".to_string()));

        write(tmp.path(), "components.json", "{}");
        let fixture = Fixture::new();
        run_add(&fixture.session(), tmp.path(), Stack::Shadcn, false).unwrap();
        assert!(!fixture.runner.commands().iter().any(|c| c.contains("init")));
    }

    #[test]
    fn test_add_storybook_skips_existing_config() {
        let tmp = vite_project("{}", &Plan::default());
        write(tmp.path(), ".storybook/main.ts", "// mine\n");
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Storybook, false).unwrap();

        assert_eq!(read(tmp.path(), ".storybook/main.ts"), "// mine\n");
        assert!(!tmp.path().join(".storybook/preview.ts").exists());
    }

    #[test]
    fn test_add_storybook_imports_existing_css() {
        let tmp = vite_project("{}", &Plan::default());
        write(tmp.path(), "src/index.css", "body {}\n");
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Storybook, false).unwrap();

        assert!(read(tmp.path(), ".storybook/preview.ts").contains("../src/index.css"));
        assert!(tmp.path().join("src/stories/WelcomeCard.stories.tsx").exists());
    }

    #[test]
    fn test_add_deploy_config_per_bundler() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "bun.lock", "");
        let fixture = Fixture::new();

        run_add(&fixture.session(), tmp.path(), Stack::Netlify, false).unwrap();

        let bun = Plan {
            bundler: Bundler::Bun,
            ..Plan::default()
        };
        assert_eq!(read(tmp.path(), "netlify.toml"), deploy::netlify_artifact(&bun).content);
        assert!(fixture.runner.commands().is_empty());
    }

    #[test]
    fn test_add_deploy_never_clobbers_edited_file() {
        let tmp = vite_project("{}", &Plan::default());
        write(tmp.path(), "vercel.json", "{ \"cleanUrls\": true }\n");
        let fixture = Fixture::new();

        let summary = run_add(&fixture.session(), tmp.path(), Stack::Vercel, false).unwrap();

        assert_eq!(summary.outcome_of("vercel.json"), Some(Outcome::SkippedDiverged));
        assert_eq!(read(tmp.path(), "vercel.json"), "{ \"cleanUrls\": true }\n");
    }

    #[test]
    fn test_unchanged_lint_config_is_not_rewritten() {
        let plan = query_plan();
        let tmp = vite_project(QUERY_MANIFEST, &plan);
        let generated = compose_lint_config(&plan, LintVariant::Strict);
        write(tmp.path(), "eslint.config.js", &generated);
        let fixture = Fixture::new();

        let summary = run_add(&fixture.session(), tmp.path(), Stack::ReactQuery, false).unwrap();

        assert_eq!(
            summary.outcome_of("eslint.config.js"),
            Some(Outcome::SkippedAlreadyPresent)
        );
        assert!(summary.changed_paths().is_empty());
        assert_eq!(read(tmp.path(), "eslint.config.js"), generated);
    }
}
