//! Kindle Core - Shared library behind the `kindle` scaffolding CLI
//!
//! This library scaffolds React frontend projects (Vite + pnpm or Bun) and
//! reshapes existing ones by adding or removing optional stacks.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure composition** - [`plan::Plan`] plus the [`templates`]
//!   composers, which turn a plan into file contents with no I/O
//! - **Layer 2: Project state** - [`project::Detector`] recovers a plan from
//!   disk and [`project::FileMutator`] applies artifacts idempotently
//! - **Layer 3: Commands** - [`commands`] wires plans, artifacts, the package
//!   manager and a [`report::Reporter`] together for `new`/`add`/`remove`/`lint`
//! - **Layer 4: Terminal output** - optional cliclack reporter (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based [`tui::ConsoleReporter`]
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use kindle_core::{commands::Session, report::QuietReporter, runtime::SystemRunner};
//! use kindle_core::{project::SubstringSniffer, stack::Stack};
//!
//! let session = Session::new(&SystemRunner, &QuietReporter, &SubstringSniffer);
//! let summary = kindle_core::run_add(&session, Path::new("."), Stack::Zustand, false)?;
//! for path in summary.changed_paths() {
//!     println!("{}", path.display());
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod plan;
pub mod project;
pub mod report;
pub mod runtime;
pub mod stack;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use commands::{run_add, run_lint, run_new, run_remove, Session, Summary};
pub use config::{FeatureFlags, Settings};
pub use error::{Result, ScaffoldError};
pub use plan::{Bundler, Plan};
pub use project::{Outcome, SubstringSniffer};
pub use report::{QuietReporter, Reporter};
pub use runtime::SystemRunner;
pub use stack::Stack;
pub use templates::LintVariant;

#[cfg(feature = "tui")]
pub use tui::{restore_terminal, ConsoleReporter};
