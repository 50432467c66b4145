//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Parameterized statements only, no string-built SQL
//! - Key uniqueness left to the table constraint
//! - No transactions; every operation is a single round trip

pub mod agents;

pub use agents::AgentRepo;
