//! Global keyboard input for the overlay.
//!
//! On Windows, this installs a low-level keyboard hook (WH_KEYBOARD_LL) on a
//! dedicated Win32 message loop thread.  Key events are placed into an
//! `mpsc` channel and consumed by the overlay, which matches them against the
//! configured toggle and zoom keys.
//!
//! # Windows-Specific Implementation
//!
//! The hook callback must complete within ~300ms or Windows will remove the
//! hook.  All processing is deferred out of the callback via the channel.
//!
//! # Testability
//!
//! The `InputHook` trait allows unit tests to inject synthetic key events
//! without requiring Windows hooks.

use std::sync::mpsc;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// A key event produced by the input hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A key was pressed down.
    Down {
        /// Windows Virtual Key code.
        vk_code: u8,
        /// Milliseconds since system start (from the hook struct).
        time_ms: u32,
    },
    /// A key was released.
    Up { vk_code: u8, time_ms: u32 },
}

impl KeyEvent {
    pub fn vk_code(&self) -> u8 {
        match *self {
            KeyEvent::Down { vk_code, .. } | KeyEvent::Up { vk_code, .. } => vk_code,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, KeyEvent::Down { .. })
    }
}

/// Error type for input hook operations.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to install keyboard hook: {0}")]
    InstallFailed(String),
    #[error("keyboard hook has already been started")]
    AlreadyStarted,
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Trait abstracting global key event production.
///
/// The production implementation uses a Windows hook; tests use
/// [`mock::MockInputHook`].
pub trait InputHook: Send {
    /// Starts the hook and returns a receiver for captured key events.
    fn start(&self) -> Result<mpsc::Receiver<KeyEvent>, HookError>;
    /// Stops the hook and releases all OS resources.  Closes the channel.
    fn stop(&self);
}

/// Hook used where no global keyboard hook exists; `start` always fails.
#[derive(Debug, Default)]
pub struct NoInputHook;

impl InputHook for NoInputHook {
    fn start(&self) -> Result<mpsc::Receiver<KeyEvent>, HookError> {
        Err(HookError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    fn stop(&self) {}
}

/// The keyboard hook for the current platform.
pub fn platform_hook() -> Box<dyn InputHook> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsKeyboardHook::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(NoInputHook)
    }
}

/// Virtual Key code produced by the key that types `c` on a US layout.
///
/// Covers the characters usable as overlay key bindings: letters, digits,
/// space, tab, and the `+`/`-`/`,`/`.` keys.  Returns `None` for anything else.
pub fn vk_for_char(c: char) -> Option<u8> {
    match c {
        'a'..='z' => Some(c.to_ascii_uppercase() as u8),
        'A'..='Z' | '0'..='9' => Some(c as u8),
        ' ' => Some(0x20),  // VK_SPACE
        '\t' => Some(0x09), // VK_TAB
        '\r' | '\n' => Some(0x0D), // VK_RETURN
        '+' | '=' => Some(0xBB), // VK_OEM_PLUS
        '-' | '_' => Some(0xBD), // VK_OEM_MINUS
        ',' | '<' => Some(0xBC), // VK_OEM_COMMA
        '.' | '>' => Some(0xBE), // VK_OEM_PERIOD
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_map_to_uppercase_vk() {
        assert_eq!(vk_for_char('m'), Some(0x4D));
        assert_eq!(vk_for_char('M'), Some(0x4D));
        assert_eq!(vk_for_char('7'), Some(0x37));
    }

    #[test]
    fn test_punctuation_and_whitespace_bindings() {
        assert_eq!(vk_for_char('\t'), Some(0x09));
        assert_eq!(vk_for_char(' '), Some(0x20));
        assert_eq!(vk_for_char('+'), Some(0xBB));
        assert_eq!(vk_for_char('-'), Some(0xBD));
        assert_eq!(vk_for_char('é'), None);
    }

    #[test]
    fn test_key_event_accessors() {
        let down = KeyEvent::Down { vk_code: 0x09, time_ms: 5 };
        let up = KeyEvent::Up { vk_code: 0x09, time_ms: 6 };
        assert!(down.is_down());
        assert!(!up.is_down());
        assert_eq!(up.vk_code(), 0x09);
    }

    #[test]
    fn test_no_input_hook_refuses_to_start() {
        let result = NoInputHook.start();
        assert!(matches!(result, Err(HookError::UnsupportedPlatform(_))));
    }
}
