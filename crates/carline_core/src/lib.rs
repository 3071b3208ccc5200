//! Carline pickup domain primitives.
//!
//! This crate owns deterministic lane ordering and placard token encoding.
//! It intentionally excludes capture, transport, and persistence concerns;
//! those live in `carline_lane` or outside the workspace entirely.

pub mod contract;
pub mod placard;
pub mod queue;
