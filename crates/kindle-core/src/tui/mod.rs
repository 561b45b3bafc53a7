//! Interactive terminal reporting using cliclack (Charm-style inline output)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod reporter;

#[cfg(feature = "tui")]
pub use reporter::{restore_terminal, ConsoleReporter};
