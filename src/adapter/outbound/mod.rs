//! Outbound adapters implementing the driven ports.
//!
//! - [`nflverse`]: HTTP feed client for stats, schedules and rosters
//! - [`memory`]: in-process expiring key-value store
//! - [`redis`]: Redis-backed key-value store
//! - [`sqlite`]: Diesel SQLite document store

pub mod memory;
pub mod nflverse;
pub mod redis;
pub mod sqlite;
