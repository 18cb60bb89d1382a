//! Modal Win32 message box.

#![cfg(target_os = "windows")]

use tracing::error;
use windows::core::HSTRING;
use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

use super::ErrorReporter;

/// Shows errors in an `OK`-only message box with the error icon.
#[derive(Debug, Default)]
pub struct MessageBoxReporter;

impl ErrorReporter for MessageBoxReporter {
    fn report(&self, title: &str, message: &str) {
        error!(title, "{message}");
        let text = HSTRING::from(message);
        let caption = HSTRING::from(title);
        // SAFETY: Both strings are valid, null-terminated and outlive the call;
        // a null owner window is allowed.
        unsafe {
            MessageBoxW(None, &text, &caption, MB_OK | MB_ICONERROR);
        }
    }
}
