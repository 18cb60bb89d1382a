//! Value types the configuration is built from.
//!
//! Nothing here reads settings; these are plain data types plus their
//! string parsers.  The `config` module does the reading.

pub mod color;
pub mod enums;
pub mod names;
pub mod rendering;
