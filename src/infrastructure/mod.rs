//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without
//! containing business logic: configuration, wiring, timers and the process
//! lifecycle.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`runtime`] - Run-until-shutdown lifecycle
//! - [`scheduler`] - Interval and cron sync triggers

pub mod bootstrap;
pub mod config;
pub mod runtime;
pub mod scheduler;
