//! Store - Settings and catalog file I/O
//!
//! This crate handles the studio settings file and loading catalog
//! overrides from disk.

mod error;
mod settings;
mod file_io;

pub use error::*;
pub use settings::*;
pub use file_io::*;
