//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`operator`]: manual triggers, job history, health and metrics for the
//!   CLI and any admin surface.

pub mod operator;
