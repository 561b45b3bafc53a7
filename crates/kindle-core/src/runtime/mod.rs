//! External collaborators: process execution, tool checks and package installs
//!
//! This module provides:
//! - A `ProcessRunner` capability with a `std::process` implementation
//! - Package manager availability checks
//! - A `DependencyInstaller` speaking pnpm or bun

pub mod check;
pub mod installer;
pub mod runner;

pub use check::{check_tool, require_tool, require_tools_for, ToolInfo};
pub use installer::{DependencyInstaller, PackageInstaller};
pub use runner::{Invocation, OutputMode, ProcessRunner, SystemRunner};
