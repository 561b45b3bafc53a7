//! Application entry file (`src/main.tsx` / `src/frontend.tsx`)
//!
//! Providers are described as data and folded in a fixed precedence, outermost
//! first. Adding a provider means adding a descriptor, not another branch.

use super::Artifact;
use crate::plan::Plan;

/// A wrapper component around the application root
#[derive(Debug)]
pub struct Provider {
    /// Identifier whose presence in an entry file means the provider is wired in
    pub marker: &'static str,
    /// Whether the plan asks for this provider
    pub enabled: fn(&Plan) -> bool,
    /// Package imports the provider needs
    pub imports: &'static [&'static str],
    /// Module-level setup emitted before the root is created
    pub setup: Option<&'static str>,
    pub open_tag: &'static str,
    pub close_tag: &'static str,
    /// Rendered after the wrapped content, still inside this provider
    pub siblings: &'static [&'static str],
}

/// Known providers, outermost first
pub static PROVIDERS: &[Provider] = &[
    Provider {
        marker: QUERY_PROVIDER_MARKER,
        enabled: wants_react_query,
        imports: &[
            "import { QueryClient, QueryClientProvider } from '@tanstack/react-query';",
            "import { ReactQueryDevtools } from '@tanstack/react-query-devtools';",
        ],
        setup: Some("const queryClient = new QueryClient();"),
        open_tag: "<QueryClientProvider client={queryClient}>",
        close_tag: "</QueryClientProvider>",
        siblings: &["<ReactQueryDevtools initialIsOpen={false} />"],
    },
    Provider {
        marker: MANTINE_PROVIDER_MARKER,
        enabled: wants_mantine,
        imports: &["import { MantineProvider } from '@mantine/core';"],
        setup: None,
        open_tag: "<MantineProvider>",
        close_tag: "</MantineProvider>",
        siblings: &[],
    },
];

fn wants_react_query(plan: &Plan) -> bool {
    plan.react_query
}

fn wants_mantine(plan: &Plan) -> bool {
    plan.mantine
}

pub const QUERY_PROVIDER_MARKER: &str = "QueryClientProvider";
pub const MANTINE_PROVIDER_MARKER: &str = "MantineProvider";

const BASE_INDENT: usize = 2;

/// Compose the entry file text for a plan
pub fn compose_entry_file(plan: &Plan) -> String {
    let active: Vec<&Provider> = PROVIDERS.iter().filter(|p| (p.enabled)(plan)).collect();

    let mut out = String::new();

    for provider in &active {
        for import in provider.imports {
            out.push_str(import);
            out.push('\n');
        }
    }
    out.push_str("import React from 'react';\n");
    out.push_str("import ReactDOM from 'react-dom/client';\n\n");
    out.push_str("import App from './App';\n");
    out.push_str("import './index.css';\n\n");

    for setup in active.iter().filter_map(|p| p.setup) {
        out.push_str(setup);
        out.push_str("\n\n");
    }

    out.push_str("const rootElement = document.getElementById('root');\n");
    out.push_str("if (!rootElement) throw new Error('Root element not found');\n");
    out.push_str("const root = ReactDOM.createRoot(rootElement);\n\n");

    out.push_str("root.render(\n");
    push_line(&mut out, 1, "<React.StrictMode>");
    render_tree(&mut out, &active, BASE_INDENT);
    push_line(&mut out, 1, "</React.StrictMode>");
    out.push_str(");\n");

    out
}

/// Entry file artifact at the bundler's conventional path
pub fn entry_artifact(plan: &Plan) -> Artifact {
    Artifact::new(plan.entry_path(), compose_entry_file(plan))
}

fn render_tree(out: &mut String, providers: &[&Provider], depth: usize) {
    match providers.split_first() {
        None => push_line(out, depth, "<App />"),
        Some((outer, inner)) => {
            push_line(out, depth, outer.open_tag);
            render_tree(out, inner, depth + 1);
            for sibling in outer.siblings {
                push_line(out, depth + 1, sibling);
            }
            push_line(out, depth, outer.close_tag);
        }
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}
