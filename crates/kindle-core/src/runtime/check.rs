//! Package manager availability checks

use super::runner::{Invocation, ProcessRunner};
use crate::error::{Result, ScaffoldError};
use crate::plan::Plan;
use std::path::Path;

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run a binary with `--version` and capture what it reports
pub fn check_tool(runner: &dyn ProcessRunner, name: &'static str, cwd: &Path) -> ToolInfo {
    match runner.run(&Invocation::new(name, ["--version"], cwd)) {
        Ok(stdout) => ToolInfo {
            name,
            version: Some(stdout.trim().to_string()).filter(|v| !v.is_empty()),
            available: true,
        },
        Err(e) => {
            tracing::debug!(tool = name, error = %e, "tool not available");
            ToolInfo {
                name,
                version: None,
                available: false,
            }
        }
    }
}

/// Fail with `MissingPrerequisite` unless the binary answers `--version`
pub fn require_tool(runner: &dyn ProcessRunner, name: &'static str, cwd: &Path) -> Result<ToolInfo> {
    let info = check_tool(runner, name, cwd);
    if info.available {
        Ok(info)
    } else {
        Err(ScaffoldError::MissingPrerequisite(format!("{} not found", name)))
    }
}

/// Every binary the plan needs: its package manager, plus `bun` for the backend
pub fn require_tools_for(runner: &dyn ProcessRunner, plan: &Plan, cwd: &Path) -> Result<Vec<ToolInfo>> {
    let mut names = vec![plan.package_manager()];
    if plan.backend && !names.contains(&"bun") {
        names.push("bun");
    }

    names
        .into_iter()
        .map(|name| require_tool(runner, name, cwd))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Bundler;

    /// Answers `--version` for the listed programs only
    struct Installed(&'static [&'static str]);

    impl ProcessRunner for Installed {
        fn run(&self, invocation: &Invocation) -> Result<String> {
            if self.0.contains(&invocation.program.as_str()) {
                Ok(format!("{} 1.2.3\n", invocation.program))
            } else {
                Err(ScaffoldError::MissingPrerequisite(format!(
                    "{} not found",
                    invocation.program
                )))
            }
        }
    }

    #[test]
    fn test_check_tool_reports_version() {
        let info = check_tool(&Installed(&["pnpm"]), "pnpm", Path::new("."));
        assert!(info.available);
        assert_eq!(info.version.as_deref(), Some("pnpm 1.2.3"));

        let missing = check_tool(&Installed(&[]), "bun", Path::new("."));
        assert!(!missing.available);
        assert_eq!(missing.version, None);
    }

    #[test]
    fn test_backend_also_needs_bun() {
        let plan = Plan {
            backend: true,
            ..Plan::default()
        };
        let result = require_tools_for(&Installed(&["pnpm"]), &plan, Path::new("."));
        match result {
            Err(ScaffoldError::MissingPrerequisite(message)) => assert_eq!(message, "bun not found"),
            other => panic!("unexpected result: {other:?}"),
        }

        let tools = require_tools_for(&Installed(&["pnpm", "bun"]), &plan, Path::new(".")).unwrap();
        assert_eq!(tools.len(), 2);
    }

    #[test]
    fn test_bun_project_checks_bun_once() {
        let plan = Plan {
            bundler: Bundler::Bun,
            ..Plan::default()
        };
        let tools = require_tools_for(&Installed(&["bun"]), &plan, Path::new(".")).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "bun");
    }
}
