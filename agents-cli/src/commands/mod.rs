//! Command implementations for the agents-api CLI

pub mod ping;
pub mod serve;

pub use ping::run_ping;
pub use serve::run_serve;
