//! nflsync - Scheduled NFL data sync with live fantasy scoring updates.
//!
//! Polls an NFL data feed on timers, detects which player stat lines and game
//! scores changed since they were last broadcast, scores the changed players
//! under standard, PPR and half-PPR rules, and pushes the changes to
//! WebSocket subscribers.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Snapshots, deltas, scoring, job records and push events
//! - [`port`] - Traits for the data source, stores and live connections
//! - [`application`] - Change cache, delta detection, fan-out, sync service
//! - [`adapter`] - nflverse feed, Redis, SQLite, in-memory store, CLI, WebSocket
//! - [`infrastructure`] - Configuration, wiring, scheduler and runtime
//!
//! # Example
//!
//! ```no_run
//! use nflsync::infrastructure::config::Config;
//! use nflsync::infrastructure::bootstrap::build_services;
//! use nflsync::domain::SyncJobType;
//! use nflsync::port::SyncOperator;
//!
//! # async fn example() -> nflsync::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let services = build_services(&config).await?;
//! let job = services.sync.trigger(SyncJobType::LiveScores).await?;
//! println!("{} updated {}", job.job_type, job.records_updated);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
