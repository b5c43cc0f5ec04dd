//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`connection`] - Live connection doubles: recording, failing, stalled.
//! - [`source`] - `ScriptedSource`, a data source fed from pre-loaded polls.
//! - [`store`] - In-memory document store and failing store doubles.
//! - [`domain`] - Builders for stat lines, games and players.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod connection;
pub mod domain;
pub mod source;
pub mod store;
