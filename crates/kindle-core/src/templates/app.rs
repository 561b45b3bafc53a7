//! Application source files: `App.tsx`, the demo store, global CSS and the Bun page

use super::Artifact;
use crate::plan::Plan;
use std::path::{Path, PathBuf};

const STYLED_MANTINE_APP: &str = r#"import '@mantine/core/styles.css';
import { Box, Button, Container, Paper, Stack, Text, Title } from '@mantine/core';

export default function App() {
  return (
    <Box className="min-h-screen bg-gradient-to-br from-gray-900 via-gray-800 to-black flex items-center justify-center p-6">
      <Container size="sm">
        <Paper shadow="xl" radius="lg" p="xl" className="backdrop-blur-xl border border-white/10 bg-white/10">
          <Stack align="center" gap="md">
            <Title order={1} className="text-center text-3xl font-bold tracking-tight text-white">
              Welcome to your new app
            </Title>
            <Text className="text-center text-gray-300 leading-relaxed max-w-md">
              React, TypeScript, Mantine and Tailwind are wired up. Start building.
            </Text>
            <Button size="md" radius="md" variant="white" color="dark">
              Get Started
            </Button>
          </Stack>
        </Paper>
      </Container>
    </Box>
  );
}
"#;

const MANTINE_APP: &str = r#"import '@mantine/core/styles.css';
import { Button, Container, Stack, Text, Title } from '@mantine/core';

export default function App() {
  return (
    <Container size="sm" py="xl">
      <Stack gap="md">
        <Title order={1}>Welcome to your new app</Title>
        <Text>React, TypeScript and Mantine are ready to go.</Text>
        <Button>Get Started</Button>
      </Stack>
    </Container>
  );
}
"#;

const ZUSTAND_APP: &str = r#"import { useAppStore } from './stores/useAppStore';

export default function App() {
  const { clicks, mood, addClick, reset } = useAppStore();

  return (
    <main className="app">
      <h1>Hello from React + {{bundler}} + TypeScript</h1>
      <p>
        {clicks} clicks, feeling {mood}
      </p>
      <button type="button" onClick={addClick}>
        Click
      </button>
      <button type="button" onClick={reset}>
        Reset
      </button>
    </main>
  );
}
"#;

const BASIC_APP: &str = r#"export default function App() {
  return (
    <main className="app">
      <h1>Hello from React + {{bundler}} + TypeScript</h1>
    </main>
  );
}
"#;

/// Select and render `src/App.tsx`.
///
/// Precedence: styled Mantine > Mantine > Zustand demo > basic.
pub fn compose_app(plan: &Plan) -> String {
    let template = if plan.mantine && plan.styled {
        STYLED_MANTINE_APP
    } else if plan.mantine {
        MANTINE_APP
    } else if plan.zustand {
        ZUSTAND_APP
    } else {
        BASIC_APP
    };

    template.replace("{{bundler}}", plan.bundler.display_name())
}

pub fn app_artifact(plan: &Plan) -> Artifact {
    Artifact::new(Path::new("src").join("App.tsx"), compose_app(plan))
}

const STORE: &str = r#"import { create } from 'zustand';

type AppState = {
  clicks: number;
  mood: string;
};

type AppActions = {
  addClick: () => void;
  reset: () => void;
};

export const useAppStore = create<AppState & AppActions>((set) => ({
  clicks: 0,
  mood: 'ready to ship',
  addClick: () =>
    set((state) => ({
      clicks: state.clicks + 1,
      mood: state.clicks + 1 >= 10 ? 'shipping' : 'ready to ship',
    })),
  reset: () => set({ clicks: 0, mood: 'ready to ship' }),
}));
"#;

/// Directory holding the demo store
pub fn store_dir() -> PathBuf {
    Path::new("src").join("stores")
}

/// `src/stores/useAppStore.ts`
pub fn store_artifact() -> Artifact {
    Artifact::new(store_dir().join("useAppStore.ts"), STORE)
}

const BASE_CSS: &str = r#":root {
  font-family: Inter, system-ui, Avenir, Helvetica, Arial, sans-serif;
  line-height: 1.5;
  color: #0f172a;
  background-color: #f8fafc;
}

body {
  margin: 0;
  min-height: 100vh;
}

.app {
  max-width: 960px;
  margin: 0 auto;
  padding: 4rem 1.5rem;
}
"#;

/// `src/index.css`, with the Tailwind import first when Tailwind is on
pub fn index_css_artifact(plan: &Plan) -> Artifact {
    let content = if plan.tailwind {
        format!("@import \"tailwindcss\";\n\n{}", BASE_CSS)
    } else {
        BASE_CSS.to_string()
    };
    Artifact::new(Path::new("src").join("index.css"), content)
}

/// `src/index.html` served by Bun, pointing at the entry file
pub fn bun_index_html_artifact(plan: &Plan) -> Artifact {
    let content = format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="./{}"></script>
  </body>
</html>
"#,
        plan.name,
        plan.entry_filename()
    );
    Artifact::new(Path::new("src").join("index.html"), content)
}

/// Starter files `bun init --react` creates that the scaffold replaces
pub const BUN_STARTER_LEFTOVERS: &[&str] = &[
    "CLAUDE.md",
    ".cursor",
    "README.md",
    "src/App.tsx",
    "src/frontend.tsx",
    "src/APITester.tsx",
    "src/react.svg",
    "src/logo.svg",
];

/// `@import` line Bulma needs in the global stylesheet
pub const BULMA_IMPORT_MARKER: &str = "bulma/css/bulma.min.css";

pub fn bulma_import_artifact() -> Artifact {
    Artifact::new(
        Path::new("src").join("index.css"),
        format!("@import '{}';\n", BULMA_IMPORT_MARKER),
    )
}
