//! Lane-side adapters and handlers around `carline_core`.
//!
//! This crate owns snapshot loading, configuration, structured logging, and
//! the `carline` binary. Ordering and placard rules stay in `carline_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
