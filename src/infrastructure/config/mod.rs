//! Infrastructure configuration modules.

pub mod cache;
pub mod logging;
pub mod server;
pub mod settings;
pub mod source;
pub mod store;
pub mod sync;

pub use settings::Config;
