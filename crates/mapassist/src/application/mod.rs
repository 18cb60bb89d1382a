//! Application layer: startup sequence and the overlay contract.
//!
//! - **`bootstrap`** – reads the configuration once, reports a failure
//!   exactly once, and only then hands over to the overlay.
//! - **`overlay`** – the [`Overlay`](overlay::Overlay) trait the bootstrap
//!   launches, and the headless overlay that reacts to key bindings.

pub mod bootstrap;
pub mod overlay;
