//! Domain models with validation at construction
//!
//! Request bodies arrive as raw JSON objects and are validated into these
//! types before anything touches the store. Invalid input returns
//! ValidationError, not panic.

pub mod agent;
pub mod commission;
pub mod validation;

pub use agent::{commission_update_from_body, Agent, AgentReplacement, NewAgent};
pub use commission::Commission;
pub use validation::ValidationError;
