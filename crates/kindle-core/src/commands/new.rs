//! `new <name>`: scaffold a project from scratch

use super::{Session, Summary};
use crate::error::{Result, ScaffoldError};
use crate::plan::{Bundler, Plan};
use crate::project::{FileMutator, Mode, Outcome};
use crate::report::in_task;
use crate::runtime::{require_tools_for, DependencyInstaller, Invocation, PackageInstaller};
use crate::stack::{self, Stack};
use crate::templates::{app, backend, config, deploy, entry, lint, readme, storybook, Artifact};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Scaffold `plan.name` below `base_dir`.
///
/// Returns every file touched along the way. With `start_dev_server` the
/// call only returns once the dev server exits.
pub fn run_new(
    session: &Session<'_>,
    base_dir: &Path,
    plan: Plan,
    start_dev_server: bool,
) -> Result<Summary> {
    let plan = plan.build(base_dir)?;
    let tools = require_tools_for(session.runner, &plan, base_dir)?;

    let reporter = session.reporter;
    reporter.intro(&format!("kindle: {} + React + TypeScript", plan.bundler));
    for tool in &tools {
        if let Some(version) = &tool.version {
            reporter.info(&format!("Using {} {}", tool.name, version));
        }
    }

    let root = base_dir.join(&plan.name);
    reporter.step(&format!("Creating project directory {}", plan.name));
    fs::create_dir(&root).map_err(|e| ScaffoldError::io("Failed to create", &root, e))?;

    let mut summary = Summary::default();
    let mutator = session.mutator(&root);
    let installer = session.installer(plan.bundler, &root);

    scaffold_starter(session, &plan, &root, &mut summary)?;
    install_stacks(session, &installer, &plan, &root)?;
    write_config_files(session, &mutator, &mut summary, &plan)?;
    write_app_files(session, &mutator, &mut summary, &plan)?;
    write_optional_files(session, &mutator, &mut summary, &plan)?;

    in_task(
        reporter,
        "Installing dependencies",
        "Installed dependencies",
        || {
            session
                .runner
                .run(&Invocation::new(plan.package_manager(), ["install"], &root))
                .map(|_| ())
        },
    )?;

    let pm = plan.package_manager();
    reporter.info(&format!(
        "Next steps:\n  cd {}\n  {} dev\n\nEdit src/App.tsx to begin",
        plan.name, pm
    ));

    if start_dev_server {
        reporter.info("Starting dev server (press Ctrl+C to stop)...");
        session
            .runner
            .run(&Invocation::new(pm, ["dev"], &root).streamed())?;
    } else {
        reporter.outro(&format!("{} is ready", plan.name));
    }

    Ok(summary)
}

fn scaffold_starter(
    session: &Session<'_>,
    plan: &Plan,
    root: &Path,
    summary: &mut Summary,
) -> Result<()> {
    match plan.bundler {
        Bundler::Vite => in_task(
            session.reporter,
            "Scaffolding with Vite (React + TypeScript)",
            "Scaffolded Vite project",
            || {
                let create = Invocation::new(
                    "pnpm",
                    ["create", "vite@latest", ".", "--template", "react-ts"],
                    root,
                )
                .env("CI", "1");
                session.runner.run(&create).map(|_| ())
            },
        ),
        Bundler::Bun => {
            in_task(
                session.reporter,
                "Scaffolding with Bun (React + TypeScript)",
                "Scaffolded Bun project",
                || {
                    let init = Invocation::new("bun", ["init", "--react", "--yes"], root);
                    session.runner.run(&init).map(|_| ())
                },
            )?;
            remove_bun_leftovers(root, summary)
        }
    }
}

/// Drop the starter files `bun init` creates that are replaced by generated ones
fn remove_bun_leftovers(root: &Path, summary: &mut Summary) -> Result<()> {
    for relative in app::BUN_STARTER_LEFTOVERS {
        let path = root.join(relative);
        let removed = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => fs::remove_file(&path),
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => Err(e),
        };
        removed.map_err(|e| ScaffoldError::io("Failed to remove", &path, e))?;
        summary.push(Path::new(relative), Outcome::Deleted);
    }
    Ok(())
}

fn install_stacks(
    session: &Session<'_>,
    installer: &PackageInstaller<'_>,
    plan: &Plan,
    root: &Path,
) -> Result<()> {
    if plan.is_vite() {
        session.install(installer, &stack::VITE_REACT_PLUGIN)?;
    }

    let mut groups: Vec<stack::PackageGroup> = Vec::new();
    if plan.mantine {
        groups.extend_from_slice(Stack::Mantine.package_groups());
    }
    if plan.framer_motion {
        groups.extend_from_slice(Stack::FramerMotion.package_groups());
    }
    if plan.tailwind {
        groups.push(stack::tailwind(plan.bundler));
    }
    if plan.react_query {
        groups.extend_from_slice(Stack::ReactQuery.package_groups());
    }
    if plan.zustand {
        groups.extend_from_slice(Stack::Zustand.package_groups());
    }
    for group in &groups {
        session.install(installer, group)?;
    }

    if plan.eslint {
        let packages = lint::eslint_packages(plan);
        in_task(session.reporter, "Installing ESLint", "Installed ESLint", || {
            installer.add_packages(&packages, true)
        })?;
    }
    if plan.prettier {
        session.install(installer, &stack::PRETTIER)?;
    }
    if plan.husky {
        install_husky(session, installer, plan, root)?;
    }
    if plan.storybook {
        session.install(installer, &stack::STORYBOOK)?;
    }
    Ok(())
}

fn install_husky(
    session: &Session<'_>,
    installer: &PackageInstaller<'_>,
    plan: &Plan,
    root: &Path,
) -> Result<()> {
    if !root.join(".git").exists() {
        session.reporter.warning(
            "No git repository found; run `git init` so the pre-commit hook takes effect",
        );
    }

    session.install(installer, &stack::husky(plan.bundler))?;

    let init = match plan.bundler {
        Bundler::Vite => Invocation::new("pnpm", ["dlx", "husky-init", "--no-install"], root),
        Bundler::Bun => Invocation::new("bun", ["run", "husky-init", "--", "--no-install"], root),
    };
    in_task(session.reporter, "Initializing Husky", "Initialized Husky", || {
        session.runner.run(&init).map(|_| ())
    })
}

fn write_config_files(
    session: &Session<'_>,
    mutator: &FileMutator<'_>,
    summary: &mut Summary,
    plan: &Plan,
) -> Result<()> {
    match plan.bundler {
        Bundler::Vite => {
            session.apply(mutator, summary, &config::vite_config_artifact(plan), Mode::Overwrite)?;
        }
        Bundler::Bun if plan.tailwind => {
            let bunfig = Path::new(config::BUNFIG_FILE);
            let existing = mutator.read_to_string(bunfig)?.unwrap_or_default();
            match config::add_bun_plugin(&existing, config::BUN_TAILWIND_PLUGIN)? {
                Some(updated) => {
                    let artifact = Artifact::new(config::BUNFIG_FILE, updated);
                    session.apply(mutator, summary, &artifact, Mode::Overwrite)?;
                }
                None => session.record(summary, bunfig, Outcome::SkippedAlreadyPresent),
            }
        }
        Bundler::Bun => {}
    }

    if plan.mantine {
        session.apply(mutator, summary, &config::postcss_artifact(), Mode::Overwrite)?;
    }
    if plan.eslint {
        let artifact = lint::lint_artifact(plan, lint::LintVariant::Strict);
        session.apply(mutator, summary, &artifact, Mode::Overwrite)?;
    }
    if plan.prettier {
        session.apply(mutator, summary, &lint::prettier_config_artifact(), Mode::Overwrite)?;
        session.apply(mutator, summary, &lint::prettier_ignore_artifact(), Mode::Overwrite)?;
    }
    if plan.husky {
        session.apply(mutator, summary, &lint::lint_staged_artifact(plan), Mode::Overwrite)?;
        session.apply(mutator, summary, &lint::pre_commit_artifact(plan), Mode::Overwrite)?;
    }
    Ok(())
}

fn write_app_files(
    session: &Session<'_>,
    mutator: &FileMutator<'_>,
    summary: &mut Summary,
    plan: &Plan,
) -> Result<()> {
    let mut artifacts = vec![app::app_artifact(plan), entry::entry_artifact(plan)];
    if plan.zustand {
        artifacts.push(app::store_artifact());
    }
    artifacts.push(app::index_css_artifact(plan));
    if plan.is_bun() {
        artifacts.push(app::bun_index_html_artifact(plan));
    }
    artifacts.push(readme::readme_artifact(plan));

    for artifact in &artifacts {
        session.apply(mutator, summary, artifact, Mode::Overwrite)?;
    }
    Ok(())
}

fn write_optional_files(
    session: &Session<'_>,
    mutator: &FileMutator<'_>,
    summary: &mut Summary,
    plan: &Plan,
) -> Result<()> {
    let mut artifacts = Vec::new();
    if plan.backend {
        artifacts.push(backend::server_artifact());
        artifacts.push(backend::package_artifact(plan));
    }
    if plan.storybook {
        artifacts.push(storybook::main_artifact());
        artifacts.push(storybook::preview_artifact(true));
    }
    if plan.docker {
        artifacts.push(deploy::dockerfile_artifact(plan));
        artifacts.push(deploy::compose_artifact(plan));
    }
    if plan.vercel {
        artifacts.push(deploy::vercel_artifact(plan));
    }
    if plan.netlify {
        artifacts.push(deploy::netlify_artifact(plan));
    }

    for artifact in &artifacts {
        session.apply(mutator, summary, artifact, Mode::Overwrite)?;
    }

    if plan.storybook {
        session.apply(mutator, summary, &storybook::story_artifact(), Mode::CreateIfAbsent)?;
    }
    Ok(())
}
