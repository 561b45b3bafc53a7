//! Build tool configuration: `vite.config.ts`, `postcss.config.cjs` and the
//! `bunfig.toml` plugin entry

use super::Artifact;
use crate::error::{Result, ScaffoldError};
use crate::plan::Plan;

pub const VITE_CONFIG_FILE: &str = "vite.config.ts";
pub const POSTCSS_CONFIG_FILE: &str = "postcss.config.cjs";
pub const BUNFIG_FILE: &str = "bunfig.toml";
pub const BUN_TAILWIND_PLUGIN: &str = "bun-plugin-tailwind";

fn vite_config(tailwind: bool) -> String {
    let mut out = String::from("import { defineConfig } from \"vite\";\n");
    out.push_str("import react from \"@vitejs/plugin-react\";\n");
    if tailwind {
        out.push_str("import tailwindcss from \"@tailwindcss/vite\";\n");
    }
    out.push_str(
        r#"import path from "node:path";
import { fileURLToPath } from "node:url";

const __filename = fileURLToPath(import.meta.url);
const __dirname = path.dirname(__filename);

export default defineConfig({
"#,
    );

    let plugins = if tailwind {
        "react(), tailwindcss()"
    } else {
        "react()"
    };
    out.push_str(&format!("  plugins: [{}],\n", plugins));
    out.push_str(
        r#"  resolve: {
    alias: {
      "@": path.resolve(__dirname, "./src"),
    },
  },
});
"#,
    );
    out
}

/// `vite.config.ts` with the React plugin, the Tailwind plugin when enabled,
/// and the `@` alias for `./src`
pub fn vite_config_artifact(plan: &Plan) -> Artifact {
    Artifact::new(VITE_CONFIG_FILE, vite_config(plan.tailwind))
        .with_variants([vite_config(true), vite_config(false)])
}

const POSTCSS_CONFIG: &str = r#"module.exports = {
  plugins: {
    'postcss-preset-mantine': {},
    'postcss-simple-vars': {
      variables: {
        'mantine-breakpoint-xs': '36em',
        'mantine-breakpoint-sm': '48em',
        'mantine-breakpoint-md': '62em',
        'mantine-breakpoint-lg': '75em',
        'mantine-breakpoint-xl': '88em',
      },
    },
  },
};
"#;

/// PostCSS preset Mantine relies on
pub fn postcss_artifact() -> Artifact {
    Artifact::new(POSTCSS_CONFIG_FILE, POSTCSS_CONFIG)
}

/// Add `plugin` to the `plugins = [...]` line of a `bunfig.toml`.
///
/// Returns `Ok(None)` when the plugin is already listed. A missing `plugins`
/// line is appended; a `plugins` line without a single-line array is refused.
pub fn add_bun_plugin(existing: &str, plugin: &str) -> Result<Option<String>> {
    if existing.contains(plugin) {
        return Ok(None);
    }

    let quoted = format!("\"{}\"", plugin);
    let mut lines: Vec<String> = existing.split('\n').map(str::to_string).collect();

    for line in lines.iter_mut() {
        if !line.trim_start().starts_with("plugins") {
            continue;
        }

        let (Some(open), Some(close)) = (line.find('['), line.find(']')) else {
            return Err(unsupported_plugins_line(plugin));
        };
        if close < open {
            return Err(unsupported_plugins_line(plugin));
        }

        let rewritten = if line[open + 1..close].trim().is_empty() {
            format!("{}{}{}", &line[..=open], quoted, &line[close..])
        } else {
            format!("{}, {}{}", &line[..close], quoted, &line[close..])
        };
        *line = rewritten;
        return Ok(Some(lines.join("\n")));
    }

    let appended = format!("plugins = [{}]\n", quoted);
    if existing.is_empty() {
        return Ok(Some(appended));
    }
    Ok(Some(format!("{}\n{}", existing.trim_end_matches('\n'), appended)))
}

fn unsupported_plugins_line(plugin: &str) -> ScaffoldError {
    ScaffoldError::InputValidation(format!(
        "unsupported {} plugins format; add \"{}\" manually",
        BUNFIG_FILE, plugin
    ))
}
