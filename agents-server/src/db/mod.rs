//! Database layer - connection pool, store trait and implementations
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default), owned by the caller and
//!   injected into the store, never a global
//! - One parameterized statement per operation (delete runs two)
//! - Rely on DB constraints for key uniqueness, no check-then-insert
//! - Handlers only see `dyn AgentStore`, so tests run against `MemoryStore`

pub mod error;
pub mod memory;
pub mod pool;
pub mod repos;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options, PoolConfig};
pub use repos::AgentRepo;
pub use store::AgentStore;
