//! Settings access: the store abstraction and the typed reader built on it.
//!
//! - **`store`**  – [`SettingsStore`], the injected read-only key/value
//!   provider, and [`MemorySettings`], the `HashMap` implementation used both
//!   in production (filled from the settings file) and in tests.
//! - **`reader`** – [`ConfigurationReader`], which fetches one key and converts
//!   it to the requested type.
//! - **`error`**  – [`ConfigurationReadError`], the single failure kind.

pub mod error;
pub mod reader;
pub mod store;

pub use error::ConfigurationReadError;
pub use reader::ConfigurationReader;
pub use store::{MemorySettings, SettingsStore};
