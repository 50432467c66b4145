//! agents-server: HTTP API over the `agents` table
//!
//! Request pipeline: extractor → validator (`models`) → store (`db`) →
//! JSON response or `ApiError` (`http`). The store is injected as an
//! `Arc<dyn AgentStore>`, MySQL in production and in-memory in tests.

pub mod db;
pub mod http;
pub mod models;

pub use db::{AgentRepo, AgentStore, MemoryStore, StoreError};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
