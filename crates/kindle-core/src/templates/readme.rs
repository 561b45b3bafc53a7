//! Project README listing the selected stacks

use super::Artifact;
use crate::plan::Plan;
use crate::templates::{app, backend, storybook};

fn features(plan: &Plan) -> Vec<String> {
    let mut features = vec![format!("{} + React + TypeScript", plan.bundler)];

    let optional = [
        (plan.framer_motion, "Framer Motion".to_string()),
        (plan.tailwind, "Tailwind CSS".to_string()),
        (
            plan.mantine,
            "Mantine UI (with Mantine PostCSS preset)".to_string(),
        ),
        (
            plan.zustand,
            format!(
                "Zustand state store (demo store in {})",
                app::store_artifact().path.display()
            ),
        ),
        (plan.react_query, "TanStack Query + Devtools".to_string()),
        (
            plan.eslint,
            "ESLint (React, TypeScript, a11y, import order, Prettier)".to_string(),
        ),
        (
            plan.prettier,
            "Prettier (Tailwind + import sort plugins)".to_string(),
        ),
        (plan.husky, "Husky + lint-staged pre-commit".to_string()),
        (
            plan.storybook,
            "Storybook (React config; starter story in src/stories)".to_string(),
        ),
        (plan.docker, "Dockerfile + docker-compose (dev/prod)".to_string()),
        (plan.vercel, "Vercel static deploy config".to_string()),
        (plan.netlify, "Netlify SPA deploy config".to_string()),
        (
            plan.backend,
            format!("Bun API server in backend/ (port {})", backend::BACKEND_PORT),
        ),
    ];

    features.extend(
        optional
            .into_iter()
            .filter_map(|(enabled, label)| enabled.then_some(label)),
    );
    features
}

/// Compose `README.md` for a plan
pub fn compose_readme(plan: &Plan) -> String {
    let pm = plan.package_manager();
    let title = if plan.name.is_empty() {
        "New App"
    } else {
        plan.name.as_str()
    };

    let mut out = format!("# {}\n\n", title);
    out.push_str(&format!(
        "Scaffolded with kindle ({} + React + TypeScript).\n\n",
        plan.bundler
    ));

    out.push_str("## What's inside\n");
    for feature in features(plan) {
        out.push_str(&format!("- {}\n", feature));
    }
    out.push('\n');

    out.push_str("## Quickstart\n```sh\n");
    out.push_str(&format!("{} dev\n", pm));
    out.push_str("```\n\n");
    out.push_str(&format!(
        "Then open http://localhost:{}\n\n",
        plan.bundler.dev_port()
    ));

    out.push_str("## Scripts\n");
    out.push_str(&format!("- `{} dev`: start dev server\n", pm));
    out.push_str(&format!("- `{} run build`: production build\n", pm));
    if plan.eslint {
        out.push_str(&format!("- `{} run lint`: run ESLint\n", pm));
    }
    if plan.prettier {
        out.push_str(&format!("- `{} run format`: run Prettier\n", pm));
    }
    if plan.storybook {
        out.push_str(&format!(
            "- `{}`: run Storybook\n",
            storybook::run_command(plan)
        ));
    }
    out.push('\n');

    if plan.mantine {
        out.push_str("## Mantine\n");
        out.push_str("- Styles imported in `src/App.tsx`\n");
        out.push_str(&format!(
            "- MantineProvider set up in `src/{}`\n\n",
            plan.entry_filename()
        ));
    }

    if plan.zustand {
        out.push_str("## Zustand\n");
        out.push_str(&format!(
            "- Demo store: `{}`\n",
            app::store_artifact().path.display()
        ));
        out.push_str("- Replace or split stores to match your app state\n\n");
    }

    if plan.tailwind {
        out.push_str("## Tailwind\n");
        if plan.is_vite() {
            out.push_str("- Configured via `@tailwindcss/vite`\n");
        } else {
            out.push_str("- Configured via `bun-plugin-tailwind` in `bunfig.toml`\n");
        }
        out.push_str("- Styles in `src/index.css`\n\n");
    }

    if plan.docker {
        out.push_str("## Docker\n");
        out.push_str(&format!(
            "- Dev: `docker compose up dev` (http://localhost:{})\n",
            plan.bundler.dev_port()
        ));
        out.push_str("- Prod: `docker compose up prod` (http://localhost:4173)\n\n");
    }

    if plan.vercel || plan.netlify {
        out.push_str("## Deploy\n");
        if plan.vercel {
            out.push_str("- Vercel: `vercel --prod` (uses `vercel.json`)\n");
        }
        if plan.netlify {
            out.push_str("- Netlify: `netlify deploy --prod` (uses `netlify.toml`)\n");
        }
        out.push('\n');
    }

    if plan.backend {
        out.push_str("## Backend\n");
        out.push_str("- Start: `cd backend && bun run dev`\n");
        out.push_str(&format!(
            "- Try: http://localhost:{}/api/hello\n\n",
            backend::BACKEND_PORT
        ));
    }

    out.push_str("## Editing\n");
    out.push_str("- Main app entry: `src/App.tsx`\n");
    out.push_str(&format!("- Providers/root: `src/{}`\n", plan.entry_filename()));

    out
}

pub fn readme_artifact(plan: &Plan) -> Artifact {
    Artifact::new("README.md", compose_readme(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Bundler;

    #[test]
    fn test_readme_lists_only_selected_stacks() {
        let plan = Plan {
            name: "demo-app".to_string(),
            react_query: true,
            docker: true,
            ..Plan::default()
        };
        let readme = compose_readme(&plan);

        assert!(readme.starts_with("# demo-app\n"));
        assert!(readme.contains("- TanStack Query + Devtools\n"));
        assert!(readme.contains("## Docker\n"));
        assert!(!readme.contains("Mantine"));
        assert!(!readme.contains("## Deploy"));
    }

    #[test]
    fn test_readme_follows_bundler() {
        let plan = Plan {
            name: "demo-app".to_string(),
            bundler: Bundler::Bun,
            tailwind: true,
            ..Plan::default()
        };
        let readme = compose_readme(&plan);

        assert!(readme.contains("bun dev\n"));
        assert!(readme.contains("http://localhost:3000"));
        assert!(readme.contains("bunfig.toml"));
        assert!(readme.contains("`src/frontend.tsx`"));
    }

    #[test]
    fn test_untitled_readme() {
        assert!(compose_readme(&Plan::default()).starts_with("# New App\n"));
    }
}
