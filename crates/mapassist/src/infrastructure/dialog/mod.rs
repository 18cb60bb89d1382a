//! Surfacing startup errors to the user.
//!
//! A configuration error stops MapAssist before any window exists, so the
//! message has to reach the user some other way: a modal message box on
//! Windows, stderr everywhere else.

use std::sync::Mutex;

use tracing::error;

#[cfg(target_os = "windows")]
pub mod windows;

/// Title of the dialog shown when the configuration cannot be read.
pub const CONFIGURATION_ERROR_TITLE: &str = "Configuration parsing error";

/// Shows an error to the user.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter {
    /// Displays `message` under `title`.  Blocks until the user has seen it
    /// where the medium allows that.
    fn report(&self, title: &str, message: &str);
}

/// Logs the error and writes it to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&self, title: &str, message: &str) {
        error!(title, "{message}");
        eprintln!("{title}: {message}");
    }
}

/// Keeps every report in memory; for tests and embedders that show errors
/// themselves.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(title, message)` pairs reported so far.
    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports.lock().expect("lock poisoned").clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, title: &str, message: &str) {
        self.reports
            .lock()
            .expect("lock poisoned")
            .push((title.to_string(), message.to_string()));
    }
}

/// The reporter for the current platform.
pub fn platform_reporter() -> Box<dyn ErrorReporter> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::MessageBoxReporter)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(ConsoleReporter)
    }
}
