//! `remove <stack>`: undo what `add` did, as far as it is still ours to undo
//!
//! Files are deleted only while they match a generated shape. Entry-file
//! providers are dropped by recomposing the entry for the reduced plan.

use super::{require_entry, Session, Summary};
use crate::error::{Result, ScaffoldError};
use crate::plan::Plan;
use crate::project::{Detector, FileMutator, Mode, Outcome};
use crate::runtime::require_tool;
use crate::stack::Stack;
use crate::templates::entry::{entry_artifact, MANTINE_PROVIDER_MARKER, QUERY_PROVIDER_MARKER};
use crate::templates::{app, config, deploy, storybook};
use std::path::Path;

pub fn run_remove(session: &Session<'_>, root: &Path, stack: Stack) -> Result<Summary> {
    if !stack.is_removable() {
        return Err(ScaffoldError::InputValidation(format!(
            "{} cannot be removed automatically; delete components.json and src/components/ui by hand",
            stack
        )));
    }

    let detector = Detector::new(root, session.sniffer)?;
    let plan = detector.detect_plan()?;
    let mutator = session.mutator(root);
    let mut summary = Summary::default();

    session.reporter.intro(&format!("kindle remove {}", stack));

    if matches!(stack, Stack::Mantine | Stack::ReactQuery) {
        require_entry(&detector, &plan)?;
    }
    if !stack.package_groups().is_empty() {
        detector.require_manifest()?;
        require_tool(session.runner, plan.package_manager(), root)?;
    }

    match stack {
        Stack::Mantine => {
            uninstall(session, &plan, root, stack)?;
            session.apply(&mutator, &mut summary, &config::postcss_artifact(), Mode::DeleteIfOwned)?;
            drop_provider(session, &mutator, &mut summary, &plan, &plan.with_mantine(false), MANTINE_PROVIDER_MARKER)?;
        }
        Stack::ReactQuery => {
            uninstall(session, &plan, root, stack)?;
            drop_provider(session, &mutator, &mut summary, &plan, &plan.with_react_query(false), QUERY_PROVIDER_MARKER)?;
        }
        Stack::Zustand => {
            uninstall(session, &plan, root, stack)?;
            session.apply(&mutator, &mut summary, &app::store_artifact(), Mode::DeleteIfOwned)?;
            mutator.remove_dir_if_empty(&app::store_dir())?;
        }
        Stack::FramerMotion => {
            uninstall(session, &plan, root, stack)?;
        }
        Stack::Bulma => {
            uninstall(session, &plan, root, stack)?;
            let import = app::bulma_import_artifact();
            if mutator.contains_marker(&import.path, app::BULMA_IMPORT_MARKER)? {
                session.reporter.warning(&format!(
                    "Remove `{}` from {} yourself",
                    import.content.trim_end(),
                    import.path.display()
                ));
            }
        }
        Stack::Storybook => {
            uninstall(session, &plan, root, stack)?;
            for artifact in [
                storybook::main_artifact(),
                storybook::preview_artifact(true),
                storybook::story_artifact(),
            ] {
                session.apply(&mutator, &mut summary, &artifact, Mode::DeleteIfOwned)?;
            }
            mutator.remove_dir_if_empty(Path::new(storybook::STORYBOOK_DIR))?;
            mutator.remove_dir_if_empty(&storybook::story_dir())?;
        }
        Stack::Docker => {
            for artifact in [deploy::dockerfile_artifact(&plan), deploy::compose_artifact(&plan)] {
                session.apply(&mutator, &mut summary, &artifact, Mode::DeleteIfOwned)?;
            }
        }
        Stack::Vercel => {
            session.apply(&mutator, &mut summary, &deploy::vercel_artifact(&plan), Mode::DeleteIfOwned)?;
        }
        Stack::Netlify => {
            session.apply(&mutator, &mut summary, &deploy::netlify_artifact(&plan), Mode::DeleteIfOwned)?;
        }
        Stack::Shadcn => unreachable!("rejected above"),
    }

    session.reporter.outro(&format!("{} removed", stack));
    Ok(summary)
}

fn uninstall(session: &Session<'_>, plan: &Plan, root: &Path, stack: Stack) -> Result<()> {
    let installer = session.installer(plan.bundler, root);
    for group in stack.package_groups() {
        session.uninstall(&installer, group)?;
    }
    Ok(())
}

fn drop_provider(
    session: &Session<'_>,
    mutator: &FileMutator<'_>,
    summary: &mut Summary,
    before: &Plan,
    after: &Plan,
    marker: &str,
) -> Result<()> {
    let path = after.entry_path();
    let outcome = mutator.unwrap(&path, marker, || entry_artifact(after))?;
    session.record(summary, &path, outcome);
    if outcome == Outcome::NoOpAbsent {
        session
            .reporter
            .info(&format!("{} not wired into {}; nothing to unwrap", marker, path.display()));
    }

    session.refresh_lint(mutator, summary, before, after)
}
