//! In-process agent store
//!
//! Same observable behavior as the MySQL repository: unique `AGENT_CODE`,
//! matched/affected row counts, `AVG` ignoring NULL commissions. Used by the
//! router tests and by `serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{AgentStore, StoreError};
use crate::models::{Agent, AgentReplacement, Commission, NewAgent};

/// Agent store held in a `BTreeMap` keyed by `AGENT_CODE`
#[derive(Debug, Default)]
pub struct MemoryStore {
    agents: RwLock<BTreeMap<String, Agent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows. Later rows win on duplicate codes.
    pub fn with_agents(agents: impl IntoIterator<Item = Agent>) -> Self {
        let map = agents
            .into_iter()
            .map(|a| (a.agent_code.clone(), a))
            .collect();
        Self {
            agents: RwLock::new(map),
        }
    }
}

#[async_trait]
impl AgentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Agent>, StoreError> {
        Ok(self.agents.read().await.values().cloned().collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.agents.read().await.len() as i64)
    }

    async fn average_commission(&self) -> Result<Option<Decimal>, StoreError> {
        let agents = self.agents.read().await;
        let values: Vec<Decimal> = agents.values().filter_map(|a| a.commission).collect();
        if values.is_empty() {
            return Ok(None);
        }
        values
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
            .and_then(|sum| sum.checked_div(Decimal::from(values.len() as u64)))
            .map(Some)
            .ok_or_else(|| {
                StoreError::ExecutionFailure(sqlx::Error::Decode(
                    "average commission overflowed".into(),
                ))
            })
    }

    async fn insert(&self, agent: &NewAgent) -> Result<(), StoreError> {
        let mut agents = self.agents.write().await;
        if agents.contains_key(&agent.agent_code) {
            return Err(StoreError::ConstraintViolation(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                agent.agent_code
            )));
        }
        agents.insert(agent.agent_code.clone(), Agent::from(agent.clone()));
        Ok(())
    }

    async fn update_commission(
        &self,
        agent_code: &str,
        commission: Commission,
    ) -> Result<u64, StoreError> {
        let mut agents = self.agents.write().await;
        match agents.get_mut(agent_code) {
            Some(agent) => {
                agent.commission = Some(commission.as_decimal());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn replace(
        &self,
        agent_code: &str,
        replacement: &AgentReplacement,
    ) -> Result<u64, StoreError> {
        let mut agents = self.agents.write().await;
        match agents.get_mut(agent_code) {
            Some(agent) => {
                agent.agent_name = Some(replacement.agent_name.clone());
                agent.commission = Some(replacement.commission.as_decimal());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn exists(&self, agent_code: &str) -> Result<bool, StoreError> {
        Ok(self.agents.read().await.contains_key(agent_code))
    }

    async fn delete(&self, agent_code: &str) -> Result<u64, StoreError> {
        Ok(u64::from(self.agents.write().await.remove(agent_code).is_some()))
    }
}
