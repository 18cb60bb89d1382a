//! Windows low-level keyboard hook implementation.
//!
//! This module installs a WH_KEYBOARD_LL hook using the Windows API.  The
//! hook lives on a dedicated Win32 message-loop thread; `stop()` posts
//! `WM_QUIT` to that thread, which unhooks and closes the event channel.
//!
//! While the hook runs, a console control handler does the same on Ctrl-C,
//! Ctrl-Break or when the console window closes, so the overlay's key loop
//! ends and the process exits normally.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread;

use tracing::{debug, info, warn};
use windows::core::BOOL;
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Console::{
    SetConsoleCtrlHandler, CTRL_BREAK_EVENT, CTRL_CLOSE_EVENT, CTRL_C_EVENT,
};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, UnhookWindowsHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, MSG,
    PM_NOREMOVE, WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP, WM_QUIT, WM_SYSKEYDOWN, WM_SYSKEYUP,
    WM_USER,
};

use super::{HookError, InputHook, KeyEvent};

/// Sender used by the hook callback to deliver events to the overlay.
/// `Some` while a hook is running.
static EVENT_SENDER: Mutex<Option<Sender<KeyEvent>>> = Mutex::new(None);

/// Thread id of the message loop, `0` when no loop is running.
static LOOP_THREAD_ID: AtomicU32 = AtomicU32::new(0);

/// Windows low-level keyboard hook.
///
/// Only one hook may run per process: the callback reaches its channel
/// through process-wide state.
#[derive(Debug, Default)]
pub struct WindowsKeyboardHook;

impl WindowsKeyboardHook {
    /// Creates a new (unstarted) hook.
    pub fn new() -> Self {
        Self
    }
}

impl InputHook for WindowsKeyboardHook {
    fn start(&self) -> Result<mpsc::Receiver<KeyEvent>, HookError> {
        let (tx, rx) = mpsc::channel::<KeyEvent>();
        {
            let mut sender = EVENT_SENDER
                .lock()
                .map_err(|_| HookError::InstallFailed("event sender lock poisoned".to_string()))?;
            if sender.is_some() {
                return Err(HookError::AlreadyStarted);
            }
            *sender = Some(tx);
        }

        // The loop thread reports whether the hook went in before we return.
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();
        let spawned = thread::Builder::new()
            .name("mapassist-hook-loop".to_string())
            .spawn(move || run_hook_message_loop(ready_tx));

        let installed = match spawned {
            Ok(_) => ready_rx
                .recv()
                .unwrap_or_else(|_| Err("hook thread exited before reporting".to_string())),
            Err(e) => Err(e.to_string()),
        };

        if let Err(reason) = installed {
            clear_sender();
            return Err(HookError::InstallFailed(reason));
        }
        debug!("keyboard hook installed");

        // SAFETY: Registers a plain function pointer; removed again in `stop()`.
        if let Err(e) = unsafe { SetConsoleCtrlHandler(Some(console_ctrl_handler), true) } {
            warn!("Ctrl-C will not stop the overlay: {e}");
        }
        Ok(rx)
    }

    fn stop(&self) {
        // SAFETY: Removing a handler that is not registered only fails.
        let _ = unsafe { SetConsoleCtrlHandler(Some(console_ctrl_handler), false) };
        shutdown_hook_loop();
    }
}

/// Ends the message loop and drops the event sender, closing the channel.
/// Does nothing when no hook is running.
fn shutdown_hook_loop() {
    let thread_id = LOOP_THREAD_ID.swap(0, Ordering::SeqCst);
    if thread_id != 0 {
        // SAFETY: Posting to a thread id is safe even if the thread has exited;
        // the call then simply fails.
        if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
            warn!("failed to stop keyboard hook loop: {e}");
        }
    }
    clear_sender();
}

/// Console control handler installed while the hook runs.
unsafe extern "system" fn console_ctrl_handler(ctrl_type: u32) -> BOOL {
    match ctrl_type {
        CTRL_C_EVENT | CTRL_BREAK_EVENT | CTRL_CLOSE_EVENT => {
            info!(ctrl_type, "shutdown signal received");
            shutdown_hook_loop();
            BOOL(1)
        }
        _ => BOOL(0),
    }
}

fn clear_sender() {
    if let Ok(mut sender) = EVENT_SENDER.lock() {
        *sender = None;
    }
}

/// Entry point for the dedicated Win32 message loop thread.
fn run_hook_message_loop(ready: Sender<Result<(), String>>) {
    let mut msg = MSG::default();

    // SAFETY: Forces creation of this thread's message queue so that
    // PostThreadMessageW from `stop()` cannot be lost.
    unsafe {
        let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
    }

    // SAFETY: SetWindowsHookExW requires the calling thread to run a message loop,
    // which starts right below.
    let hook: HHOOK = match unsafe {
        SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0)
    } {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };

    // SAFETY: Plain Win32 query for the current thread.
    LOOP_THREAD_ID.store(unsafe { GetCurrentThreadId() }, Ordering::SeqCst);
    let _ = ready.send(Ok(()));

    // Win32 message loop – blocks until WM_QUIT is posted
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            DispatchMessageW(&msg);
        }
        UnhookWindowsHookEx(hook).ok();
    }
    debug!("keyboard hook loop exited");
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// This function is called by Windows from the hook message loop thread.
/// It must return quickly (< ~300ms) to avoid hook removal by the OS.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: Must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
    let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);
    let vk_code = kbs.vkCode as u8;
    let time_ms = kbs.time;

    let event = match w_param.0 as u32 {
        WM_KEYDOWN | WM_SYSKEYDOWN => Some(KeyEvent::Down { vk_code, time_ms }),
        WM_KEYUP | WM_SYSKEYUP => Some(KeyEvent::Up { vk_code, time_ms }),
        _ => None,
    };

    if let (Some(event), Ok(guard)) = (event, EVENT_SENDER.lock()) {
        if let Some(sender) = guard.as_ref() {
            // Ignore send errors (receiver dropped during shutdown).
            let _ = sender.send(event);
        }
    }

    // The overlay only observes keys; every event continues down the chain.
    // SAFETY: Forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}
