//! Canvas Engine - Surface store, history, and mutation controller
//!
//! This crate implements the editing core of the design canvas: an ordered
//! element list per surface, per-surface snapshot undo/redo, typed product
//! configuration commands, and the controller that ties user gestures to
//! store mutations and history commits.

mod error;
mod surface_store;
mod history;
mod commands;
mod zoom;
mod controller;

pub use error::*;
pub use surface_store::*;
pub use history::*;
pub use commands::*;
pub use zoom::*;
pub use controller::*;
