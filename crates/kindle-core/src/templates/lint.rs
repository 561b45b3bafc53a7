//! ESLint, Prettier, lint-staged and pre-commit hook templates

use super::Artifact;
use crate::plan::{Bundler, Plan};
use clap::ValueEnum;
use std::path::Path;

pub const ESLINT_CONFIG_FILE: &str = "eslint.config.js";

/// ESLint preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum LintVariant {
    /// Full rule set: unicorn, import ordering, a11y, prettier
    Strict,
    /// Core recommended rules only; no unicorn, import ordering off
    Relaxed,
}

impl LintVariant {
    pub fn all() -> [LintVariant; 2] {
        [LintVariant::Strict, LintVariant::Relaxed]
    }
}

/// Compose `eslint.config.js` for a plan.
///
/// The TanStack Query plugin is only wired in when the plan has React Query.
/// Mantine projects ignore the CommonJS PostCSS config; Bun projects also lint
/// with Bun globals.
pub fn compose_lint_config(plan: &Plan, variant: LintVariant) -> String {
    let strict = variant == LintVariant::Strict;
    let mut out = String::new();

    out.push_str("import js from \"@eslint/js\";\n");
    out.push_str("import globals from \"globals\";\n");
    out.push_str("import tsParser from \"@typescript-eslint/parser\";\n");
    out.push_str("import tsPlugin from \"@typescript-eslint/eslint-plugin\";\n");
    if plan.react_query {
        out.push_str("import tanstackQuery from \"@tanstack/eslint-plugin-query\";\n");
    }
    out.push_str("import reactPlugin from \"eslint-plugin-react\";\n");
    out.push_str("import reactHooks from \"eslint-plugin-react-hooks\";\n");
    out.push_str("import jsxA11y from \"eslint-plugin-jsx-a11y\";\n");
    out.push_str("import importPlugin from \"eslint-plugin-import\";\n");
    if strict {
        out.push_str("import unicorn from \"eslint-plugin-unicorn\";\n");
    }
    out.push_str("import prettier from \"eslint-plugin-prettier\";\n");
    out.push_str("import configPrettier from \"eslint-config-prettier\";\n\n");

    let mut ignores = vec!["dist", "node_modules"];
    if plan.mantine {
        ignores.push("postcss.config.cjs");
    }
    if plan.is_bun() {
        ignores.push("bun.lock");
    }
    let ignores = ignores
        .iter()
        .map(|i| format!("\"{}\"", i))
        .collect::<Vec<_>>()
        .join(", ");

    out.push_str("export default [\n");
    out.push_str(&format!("  {{\n    ignores: [{}],\n  }},\n", ignores));
    out.push_str("  js.configs.recommended,\n");
    out.push_str("  importPlugin.flatConfigs.recommended,\n");
    out.push_str("  {\n");
    out.push_str("    files: [\"**/*.{ts,tsx}\"],\n");
    out.push_str("    languageOptions: {\n");
    out.push_str("      parser: tsParser,\n");
    out.push_str("      parserOptions: {\n");
    out.push_str("        ecmaVersion: \"latest\",\n");
    out.push_str("        sourceType: \"module\",\n");
    out.push_str("        ecmaFeatures: {\n          jsx: true,\n        },\n");
    out.push_str("      },\n");
    out.push_str("      globals: {\n");
    out.push_str("        ...globals.browser,\n");
    out.push_str("        ...globals.es2020,\n");
    if plan.is_bun() {
        out.push_str("        Bun: \"readonly\",\n");
    }
    out.push_str("      },\n");
    out.push_str("    },\n");

    out.push_str("    plugins: {\n");
    out.push_str("      \"@typescript-eslint\": tsPlugin,\n");
    if plan.react_query {
        out.push_str("      \"@tanstack/query\": tanstackQuery,\n");
    }
    out.push_str("      react: reactPlugin,\n");
    out.push_str("      \"react-hooks\": reactHooks,\n");
    out.push_str("      \"jsx-a11y\": jsxA11y,\n");
    out.push_str("      import: importPlugin,\n");
    if strict {
        out.push_str("      unicorn,\n");
    }
    out.push_str("      prettier,\n");
    out.push_str("    },\n");

    out.push_str("    rules: {\n");
    out.push_str("      ...tsPlugin.configs.recommended.rules,\n");
    out.push_str("      ...reactPlugin.configs.recommended.rules,\n");
    out.push_str("      ...reactPlugin.configs[\"jsx-runtime\"].rules,\n");
    out.push_str("      ...reactHooks.configs.recommended.rules,\n");
    out.push_str("      ...jsxA11y.configs.recommended.rules,\n");
    if plan.react_query {
        out.push_str("      ...tanstackQuery.configs.recommended.rules,\n");
    }
    if strict {
        out.push_str("      ...unicorn.configs.recommended.rules,\n");
    }
    out.push_str("      \"react/react-in-jsx-scope\": \"off\",\n");
    out.push_str("      \"react/prop-types\": \"off\",\n");
    if strict {
        out.push_str(concat!(
            "      \"import/order\": [\n",
            "        \"warn\",\n",
            "        {\n",
            "          groups: [[\"builtin\", \"external\"], \"internal\", [\"parent\", \"sibling\", \"index\"]],\n",
            "          \"newlines-between\": \"always\",\n",
            "          alphabetize: { order: \"asc\", caseInsensitive: true },\n",
            "        },\n",
            "      ],\n",
            "      \"import/newline-after-import\": [\"warn\", { count: 1 }],\n",
        ));
    } else {
        out.push_str("      \"import/order\": \"off\",\n");
        out.push_str("      \"import/newline-after-import\": \"off\",\n");
    }
    out.push_str("      \"prettier/prettier\": \"warn\",\n");
    out.push_str("    },\n");

    out.push_str("    settings: {\n");
    out.push_str("      react: {\n        version: \"detect\",\n      },\n");
    out.push_str("    },\n");
    out.push_str("  },\n");
    out.push_str("  configPrettier,\n");
    out.push_str("];\n");

    out
}

pub fn lint_artifact(plan: &Plan, variant: LintVariant) -> Artifact {
    Artifact::new(ESLINT_CONFIG_FILE, compose_lint_config(plan, variant))
}

/// Whether `content` is exactly one of the presets composed for `plan`
pub fn matching_variant(plan: &Plan, content: &[u8]) -> Option<LintVariant> {
    LintVariant::all()
        .into_iter()
        .find(|variant| compose_lint_config(plan, *variant).as_bytes() == content)
}

/// Development packages backing the ESLint config
pub fn eslint_packages(plan: &Plan) -> Vec<&'static str> {
    let mut packages = vec![
        "eslint@latest",
        "@eslint/js@latest",
        "globals@latest",
        "@typescript-eslint/parser@latest",
        "@typescript-eslint/eslint-plugin@latest",
        "eslint-import-resolver-typescript@latest",
        "eslint-plugin-react@latest",
        "eslint-plugin-react-hooks@latest",
        "eslint-plugin-jsx-a11y@latest",
        "eslint-plugin-import@latest",
        "eslint-plugin-unicorn@latest",
        "eslint-plugin-prettier@latest",
        "eslint-config-prettier@latest",
    ];
    if plan.react_query {
        packages.push("@tanstack/eslint-plugin-query@latest");
    }
    packages
}

fn lint_staged_for(bundler: Bundler) -> String {
    let runner = match bundler {
        Bundler::Vite => "pnpm",
        Bundler::Bun => "bunx",
    };
    format!(
        "{{\n  \"*.{{js,jsx,ts,tsx}}\": [\"{runner} eslint --fix\"],\n  \"*.{{js,jsx,ts,tsx,css,md,json}}\": [\"{runner} prettier --write\"]\n}}\n"
    )
}

fn pre_commit_for(bundler: Bundler) -> String {
    let command = match bundler {
        Bundler::Vite => "pnpm lint-staged",
        Bundler::Bun => "bunx lint-staged",
    };
    format!("#!/bin/sh\n. \"$(dirname \"$0\")/_/husky.sh\"\n\n{}\n", command)
}

/// `.lintstagedrc`
pub fn lint_staged_artifact(plan: &Plan) -> Artifact {
    Artifact::new(".lintstagedrc", lint_staged_for(plan.bundler))
        .with_variants(Bundler::all().into_iter().map(lint_staged_for))
}

/// `.husky/pre-commit`
pub fn pre_commit_artifact(plan: &Plan) -> Artifact {
    Artifact::new(Path::new(".husky").join("pre-commit"), pre_commit_for(plan.bundler))
        .with_variants(Bundler::all().into_iter().map(pre_commit_for))
        .executable()
}

const PRETTIER_CONFIG: &str = r#"{
  "printWidth": 120,
  "tabWidth": 2,
  "useTabs": false,
  "trailingComma": "es5",
  "bracketSpacing": true,
  "arrowParens": "avoid",
  "endOfLine": "lf",
  "semi": false,
  "plugins": [
    "prettier-plugin-tailwindcss",
    "@ianvs/prettier-plugin-sort-imports"
  ],
  "importOrder": [
    "^@/(.*)$",
    "^[./]"
  ],
  "importOrderSeparation": true
}
"#;

const PRETTIER_IGNORE: &str = "dist\nnode_modules\ncoverage\npnpm-lock.yaml\nbun.lock\n";

/// `.prettierrc`
pub fn prettier_config_artifact() -> Artifact {
    Artifact::new(".prettierrc", PRETTIER_CONFIG)
}

/// `.prettierignore`
pub fn prettier_ignore_artifact() -> Artifact {
    Artifact::new(".prettierignore", PRETTIER_IGNORE)
}

pub const PRETTIER_PACKAGES: &[&str] = &[
    "prettier@latest",
    "prettier-plugin-tailwindcss@latest",
    "@ianvs/prettier-plugin-sort-imports@latest",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn all_plans() -> Vec<Plan> {
        let mut plans = Vec::new();
        for bundler in Bundler::all() {
            for mask in 0..4 {
                plans.push(Plan {
                    bundler,
                    react_query: mask & 1 != 0,
                    mantine: mask & 2 != 0,
                    ..Plan::default()
                });
            }
        }
        plans
    }

    #[test]
    fn test_relaxed_never_mentions_unicorn() {
        for plan in all_plans() {
            let config = compose_lint_config(&plan, LintVariant::Relaxed);
            assert!(!config.contains("unicorn"), "plan {plan:?}");
            assert!(config.contains("\"import/order\": \"off\""));
            assert!(config.contains("\"import/newline-after-import\": \"off\""));
        }
    }

    #[test]
    fn test_strict_has_full_rule_set() {
        for plan in all_plans() {
            let config = compose_lint_config(&plan, LintVariant::Strict);
            assert!(config.contains("import unicorn from \"eslint-plugin-unicorn\";"));
            assert!(config.contains("...unicorn.configs.recommended.rules"));
            assert!(config.contains("\"newlines-between\": \"always\""));
        }
    }

    #[test]
    fn test_query_plugin_follows_plan() {
        let with = Plan {
            react_query: true,
            ..Plan::default()
        };
        assert!(compose_lint_config(&with, LintVariant::Strict).contains("@tanstack/query"));
        assert!(!compose_lint_config(&Plan::default(), LintVariant::Strict).contains("tanstack"));
        assert!(eslint_packages(&with).contains(&"@tanstack/eslint-plugin-query@latest"));
    }

    #[test]
    fn test_brackets_balance_in_every_variant() {
        for plan in all_plans() {
            for variant in LintVariant::all() {
                let config = compose_lint_config(&plan, variant);
                for (open, close) in [('{', '}'), ('[', ']'), ('(', ')')] {
                    assert_eq!(
                        config.matches(open).count(),
                        config.matches(close).count(),
                        "{open}{close} unbalanced for {plan:?} {variant:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_matching_variant() {
        let plan = Plan::default();
        let relaxed = compose_lint_config(&plan, LintVariant::Relaxed);
        assert_eq!(
            matching_variant(&plan, relaxed.as_bytes()),
            Some(LintVariant::Relaxed)
        );
        assert_eq!(matching_variant(&plan, b"export default [];\n"), None);
    }

    #[test]
    fn test_lint_staged_is_valid_json() {
        for bundler in Bundler::all() {
            let parsed: serde_yaml::Value = serde_yaml::from_str(&lint_staged_for(bundler)).unwrap();
            assert!(parsed.is_mapping());
        }
    }

    #[test]
    fn test_prettier_config_is_valid_json() {
        let parsed: serde_yaml::Value = serde_yaml::from_str(PRETTIER_CONFIG).unwrap();
        assert_eq!(parsed["printWidth"].as_u64(), Some(120));
    }

    #[test]
    fn test_pre_commit_uses_package_manager() {
        let bun = Plan {
            bundler: Bundler::Bun,
            ..Plan::default()
        };
        let artifact = pre_commit_artifact(&bun);
        assert!(artifact.content.ends_with("bunx lint-staged\n"));
        assert!(artifact.executable);
        assert_eq!(artifact.variants.len(), 1);
    }
}
