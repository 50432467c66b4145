//! Store trait - the seam between HTTP handlers and persistence

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::StoreError;
use crate::models::{Agent, AgentReplacement, Commission, NewAgent};

/// Persistence operations over the `agents` table.
///
/// Each method runs exactly one statement (or, for the MySQL update paths,
/// one statement plus an existence probe when the driver reports zero
/// changed rows). Implementations must be cheap to share behind an `Arc`.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// All agents, ordered by `AGENT_CODE`.
    async fn list(&self) -> Result<Vec<Agent>, StoreError>;

    /// Number of rows in the table.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Average commission, `None` when there are no rows.
    async fn average_commission(&self) -> Result<Option<Decimal>, StoreError>;

    /// Insert a new agent.
    ///
    /// # Errors
    /// Returns `StoreError::ConstraintViolation` if the code already exists.
    async fn insert(&self, agent: &NewAgent) -> Result<(), StoreError>;

    /// Set the commission of one agent, returning the matched-row count.
    ///
    /// Zero means no agent has this code; it is not an error.
    async fn update_commission(
        &self,
        agent_code: &str,
        commission: Commission,
    ) -> Result<u64, StoreError>;

    /// Replace name and commission of one agent, returning the matched-row count.
    async fn replace(
        &self,
        agent_code: &str,
        replacement: &AgentReplacement,
    ) -> Result<u64, StoreError>;

    /// Whether a row with this code exists.
    async fn exists(&self, agent_code: &str) -> Result<bool, StoreError>;

    /// Delete one agent, returning the affected-row count.
    async fn delete(&self, agent_code: &str) -> Result<u64, StoreError>;
}
