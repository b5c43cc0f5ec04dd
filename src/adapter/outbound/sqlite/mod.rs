//! SQLite persistence adapters.
//!
//! Roster and schedule documents are stored through Diesel with an r2d2
//! connection pool and embedded migrations.

pub mod connection;
pub mod model;
pub mod schema;
pub mod store;

pub use connection::{create_pool, run_migrations, DbPool};
pub use store::SqliteDocumentStore;
