//! Infrastructure layer for the overlay launcher.
//!
//! Contains OS-facing adapters: the settings file on disk, the global
//! keyboard hook, and the error dialog.
//!
//! **Dependency rule**: this layer may depend on `mapassist_core`, but the
//! core crate never sees anything defined here.

pub mod dialog;
pub mod input_hook;
pub mod storage;
