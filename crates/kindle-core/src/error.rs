//! Error taxonomy shared by every command
//!
//! All variants are terminal for the current invocation. Nothing is retried and
//! nothing already written is rolled back.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the scaffolding core
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Invalid flag combination or missing argument; nothing was touched
    #[error("{0}")]
    InputValidation(String),

    /// Target project directory already exists; nothing was touched
    #[error("Project directory {} already exists. Please choose a different name.", .0.display())]
    AlreadyExists(PathBuf),

    /// Bundler or plan could not be inferred from the current directory
    #[error("{0}")]
    Detection(String),

    /// A required binary or project file is missing
    #[error("{0}")]
    MissingPrerequisite(String),

    /// Filesystem failure while reading, writing or deleting
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// External command exited unsuccessfully; `output` holds what it printed
    #[error("`{command}` failed ({status}){}", format_output(.output))]
    ExternalProcess {
        command: String,
        status: String,
        output: String,
    },

    /// Settings file could not be parsed
    #[error("Failed to parse {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

impl ScaffoldError {
    /// Build an `Io` error for the given action and path
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScaffoldError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_process_includes_captured_output() {
        let err = ScaffoldError::ExternalProcess {
            command: "pnpm install".to_string(),
            status: "exit status: 1".to_string(),
            output: "ERR_PNPM_NO_LOCKFILE\n".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("`pnpm install` failed (exit status: 1)"));
        assert!(message.ends_with("ERR_PNPM_NO_LOCKFILE"));
    }

    #[test]
    fn test_external_process_without_output() {
        let err = ScaffoldError::ExternalProcess {
            command: "bun dev".to_string(),
            status: "signal: 2".to_string(),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "`bun dev` failed (signal: 2)");
    }

    #[test]
    fn test_already_exists_names_directory() {
        let err = ScaffoldError::AlreadyExists(PathBuf::from("demo-app"));
        assert!(err.to_string().contains("demo-app already exists"));
    }
}
