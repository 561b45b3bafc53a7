//! Storybook configuration and starter story

use super::Artifact;
use crate::plan::{Bundler, Plan};
use std::path::{Path, PathBuf};

pub const STORYBOOK_DIR: &str = ".storybook";
pub const STORYBOOK_PORT: u16 = 6006;

pub const STORYBOOK_PACKAGES: &[&str] = &[
    "storybook@latest",
    "@storybook/react-vite@latest",
    "@storybook/addon-essentials@latest",
    "@storybook/addon-interactions@latest",
    "@storybook/blocks@latest",
    "@storybook/test@latest",
];

const MAIN: &str = r#"import type { StorybookConfig } from "@storybook/react-vite";

const config: StorybookConfig = {
  stories: ["../src/**/*.mdx", "../src/**/*.stories.@(js|jsx|ts|tsx)"],
  addons: [
    "@storybook/addon-essentials",
    "@storybook/addon-interactions",
    "@storybook/blocks",
  ],
  framework: {
    name: "@storybook/react-vite",
    options: {},
  },
  docs: {
    autodocs: "tag",
  },
};

export default config;
"#;

fn preview(import_css: bool) -> String {
    let mut out = String::from("import type { Preview } from \"@storybook/react\";\n");
    if import_css {
        out.push_str("import \"../src/index.css\";\n");
    }
    out.push_str(
        r#"
const preview: Preview = {
  parameters: {
    actions: { argTypesRegex: "^on[A-Z].*" },
    controls: {
      matchers: {
        color: /(background|color)$/i,
        date: /Date$/,
      },
    },
  },
};

export default preview;
"#,
    );
    out
}

const STORY: &str = r#"import type { Meta, StoryObj } from "@storybook/react";

type WelcomeCardProps = {
  title: string;
  tagline: string;
  cta: string;
};

function WelcomeCard({ title, tagline, cta }: WelcomeCardProps) {
  return (
    <div className="max-w-lg rounded-2xl border border-slate-200/30 bg-white/5 p-6 shadow-lg">
      <h2 className="text-2xl font-semibold">{title}</h2>
      <p>{tagline}</p>
      <button type="button">{cta}</button>
    </div>
  );
}

const meta: Meta<typeof WelcomeCard> = {
  title: "Welcome/Card",
  component: WelcomeCard,
  args: {
    title: "Welcome",
    tagline: "React + TypeScript, scaffolded and ready",
    cta: "Get started",
  },
};

export default meta;
type Story = StoryObj<typeof meta>;

export const Default: Story = {};

export const BoldCTA: Story = {
  args: {
    cta: "Launch dev server",
  },
};
"#;

pub fn main_artifact() -> Artifact {
    Artifact::new(Path::new(STORYBOOK_DIR).join("main.ts"), MAIN)
}

/// `preview.ts`; imports the global stylesheet when `import_css` is set.
/// Both shapes count as generated.
pub fn preview_artifact(import_css: bool) -> Artifact {
    Artifact::new(Path::new(STORYBOOK_DIR).join("preview.ts"), preview(import_css))
        .with_variants([preview(true), preview(false)])
}

pub fn story_dir() -> PathBuf {
    Path::new("src").join("stories")
}

pub fn story_artifact() -> Artifact {
    Artifact::new(story_dir().join("WelcomeCard.stories.tsx"), STORY)
}

/// Command line that starts the Storybook dev server
pub fn run_command(plan: &Plan) -> String {
    match plan.bundler {
        Bundler::Vite => format!("pnpm storybook dev -p {}", STORYBOOK_PORT),
        Bundler::Bun => format!("bun run storybook dev -p {}", STORYBOOK_PORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_css_import() {
        assert!(preview_artifact(true)
            .content
            .contains("import \"../src/index.css\";"));
        assert!(!preview_artifact(false).content.contains("index.css"));
        assert!(preview_artifact(true).is_generated(preview(false).as_bytes()));
    }

    #[test]
    fn test_run_command_per_bundler() {
        assert_eq!(run_command(&Plan::default()), "pnpm storybook dev -p 6006");
        let bun = Plan {
            bundler: Bundler::Bun,
            ..Plan::default()
        };
        assert_eq!(run_command(&bun), "bun run storybook dev -p 6006");
    }
}
