//! cliclack-backed reporter

use crate::report::Reporter;
use cliclack::ProgressBar;
use std::cell::RefCell;
use std::io;

/// Intro/outro framing, log lines and a spinner per long-running task
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn stop_spinner(&self, message: &str) -> bool {
        match self.spinner.borrow_mut().take() {
            Some(spinner) => {
                spinner.stop(message);
                true
            }
            None => false,
        }
    }
}

/// Terminal write failures are logged and otherwise ignored
fn emit(result: io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "failed to write to terminal");
    }
}

impl Reporter for ConsoleReporter {
    fn intro(&self, title: &str) {
        emit(cliclack::intro(title));
    }

    fn outro(&self, message: &str) {
        emit(cliclack::outro(message));
    }

    fn step(&self, message: &str) {
        emit(cliclack::log::step(message));
    }

    fn info(&self, message: &str) {
        emit(cliclack::log::info(message));
    }

    fn success(&self, message: &str) {
        emit(cliclack::log::success(message));
    }

    fn warning(&self, message: &str) {
        emit(cliclack::log::warning(message));
    }

    fn begin_task(&self, message: &str) {
        self.stop_spinner("");
        let spinner = cliclack::spinner();
        spinner.start(message);
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn finish_task(&self, message: &str) {
        if !self.stop_spinner(message) {
            self.success(message);
        }
    }

    fn fail_task(&self, message: &str) {
        match self.spinner.borrow_mut().take() {
            Some(spinner) => spinner.error(message),
            None => emit(cliclack::log::error(message)),
        }
    }
}

/// Show the cursor again after an interrupted spinner
pub fn restore_terminal() {
    emit(::console::Term::stderr().show_cursor());
}
