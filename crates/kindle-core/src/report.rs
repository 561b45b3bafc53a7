//! User-facing progress reporting
//!
//! Commands receive a `&dyn Reporter` instead of consulting a global
//! verbosity switch. The interactive implementation lives in
//! [`tui`](crate::tui); [`QuietReporter`] prints plain lines without spinners.

use crate::error::Result;
use colored::Colorize;

pub trait Reporter {
    /// Opening banner for a command
    fn intro(&self, title: &str);
    /// Closing line for a successful command
    fn outro(&self, message: &str);
    fn step(&self, message: &str);
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);

    /// Start a long-running step (spinner in interactive mode)
    fn begin_task(&self, message: &str);
    fn finish_task(&self, message: &str);
    fn fail_task(&self, message: &str);
}

/// Run `work` as one reported task.
///
/// `running` is shown while it runs, `done` on success, and a failure line
/// derived from `running` when it returns an error.
pub fn in_task<T, F>(reporter: &dyn Reporter, running: &str, done: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    reporter.begin_task(running);
    match work() {
        Ok(value) => {
            reporter.finish_task(done);
            Ok(value)
        }
        Err(e) => {
            reporter.fail_task(&format!("{} failed", running));
            Err(e)
        }
    }
}

/// Plain colored lines, no spinners or banners
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietReporter;

impl Reporter for QuietReporter {
    fn intro(&self, _title: &str) {}

    fn outro(&self, message: &str) {
        println!("{}", message.green());
    }

    fn step(&self, message: &str) {
        println!("{} {}", "→".cyan(), message);
    }

    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "!".yellow(), message.yellow());
    }

    fn begin_task(&self, _message: &str) {}

    fn finish_task(&self, message: &str) {
        self.success(message);
    }

    fn fail_task(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }
}
