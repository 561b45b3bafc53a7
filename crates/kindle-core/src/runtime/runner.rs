//! External command execution
//!
//! Commands run synchronously to completion. Captured commands keep their
//! output so a failure can surface it; streamed commands inherit the terminal.

use crate::error::{Result, ScaffoldError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// How a command's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect stdout and stderr; shown only when the command fails
    Capture,
    /// Inherit the terminal (interactive tools, dev servers)
    Stream,
}

/// One external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
    pub output: OutputMode,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
            output: OutputMode::Capture,
        }
    }

    /// Build from a command line such as `pnpm dlx`, splitting on whitespace
    pub fn from_command_line<I, S>(command_line: &str, args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = command_line.split_whitespace();
        let program = words.next().unwrap_or_default();
        let mut all: Vec<String> = words.map(str::to_string).collect();
        all.extend(args.into_iter().map(Into::into));
        Self::new(program, all, cwd)
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn streamed(mut self) -> Self {
        self.output = OutputMode::Stream;
        self
    }

    /// The command as a user would type it
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Launches external commands
pub trait ProcessRunner {
    /// Run to completion; returns captured stdout (empty when streamed)
    fn run(&self, invocation: &Invocation) -> Result<String>;
}

/// Runs commands with `std::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        tracing::debug!(
            command = %invocation.display(),
            cwd = %invocation.cwd.display(),
            mode = ?invocation.output,
            "running"
        );

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)));

        let spawn_error = |e: std::io::Error| {
            if e.kind() == ErrorKind::NotFound {
                ScaffoldError::MissingPrerequisite(format!("{} not found", invocation.program))
            } else {
                ScaffoldError::ExternalProcess {
                    command: invocation.display(),
                    status: "could not start".to_string(),
                    output: e.to_string(),
                }
            }
        };

        match invocation.output {
            OutputMode::Stream => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_error)?;

                if status.success() {
                    Ok(String::new())
                } else {
                    Err(ScaffoldError::ExternalProcess {
                        command: invocation.display(),
                        status: status.to_string(),
                        output: String::new(),
                    })
                }
            }
            OutputMode::Capture => {
                let output = command
                    .stdin(Stdio::null())
                    .output()
                    .map_err(spawn_error)?;

                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                if output.status.success() {
                    return Ok(stdout);
                }

                let stderr = String::from_utf8_lossy(&output.stderr);
                let combined = format!("{}{}", stdout, stderr);
                tracing::debug!(command = %invocation.display(), status = %output.status, "command failed");
                Err(ScaffoldError::ExternalProcess {
                    command: invocation.display(),
                    status: output.status.to_string(),
                    output: combined,
                })
            }
        }
    }
}
