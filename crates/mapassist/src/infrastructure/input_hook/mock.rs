//! Mock input hook for testing.
//!
//! Allows tests to inject synthetic [`KeyEvent`]s without requiring a running
//! Windows message loop or OS hooks.

use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};

use super::{HookError, InputHook, KeyEvent};

/// A mock implementation of [`InputHook`] that allows tests to inject events.
///
/// Clones share the same channel, so a test can keep one handle while the
/// overlay owns the other.
#[derive(Clone, Default)]
pub struct MockInputHook {
    sender: Arc<Mutex<Option<Sender<KeyEvent>>>>,
    script: Arc<Mutex<Option<Vec<KeyEvent>>>>,
    start_count: Arc<Mutex<u32>>,
}

impl MockInputHook {
    /// Creates a new mock hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hook whose next `start()` delivers `events` and then closes
    /// the channel, as if the user typed them and the hook was stopped.
    pub fn scripted(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        let hook = Self::new();
        *hook.script.lock().expect("lock poisoned") = Some(events.into_iter().collect());
        hook
    }

    /// Injects a synthetic event, as if captured from the keyboard.
    ///
    /// Panics if `start()` has not been called or if `stop()` has been called.
    pub fn inject_event(&self, event: KeyEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        if let Some(ref sender) = *guard {
            sender
                .send(event)
                .expect("receiver has been dropped; call start() first");
        } else {
            panic!("MockInputHook::inject_event called before start()");
        }
    }

    /// Injects a key press followed by its release.
    pub fn press(&self, vk_code: u8) {
        self.inject_event(KeyEvent::Down { vk_code, time_ms: 0 });
        self.inject_event(KeyEvent::Up { vk_code, time_ms: 0 });
    }

    /// Returns the number of times [`InputHook::start`] was called.
    pub fn start_count(&self) -> u32 {
        *self.start_count.lock().expect("lock poisoned")
    }

    /// `true` while a started channel is open.
    pub fn is_running(&self) -> bool {
        self.sender.lock().expect("lock poisoned").is_some()
    }
}

impl InputHook for MockInputHook {
    fn start(&self) -> Result<mpsc::Receiver<KeyEvent>, HookError> {
        let (tx, rx) = mpsc::channel();
        *self.start_count.lock().expect("lock poisoned") += 1;

        if let Some(events) = self.script.lock().expect("lock poisoned").take() {
            for event in events {
                tx.send(event).expect("receiver is alive");
            }
            // `tx` is dropped here, closing the channel after the script.
            return Ok(rx);
        }

        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Drop the sender to close the channel
        *self.sender.lock().expect("lock poisoned") = None;
    }
}
