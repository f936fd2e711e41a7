//! Observability subsystem.
//!
//! Structured logging only: the plugin has no metrics surface.

pub mod logging;
