//! Agent repository - MySQL/MariaDB statement executor
//!
//! Every operation binds its values into one fixed parameterized statement
//! and runs it on the pool:
//! - list/count/average: single SELECT
//! - insert: INSERT, duplicate key surfaces as a constraint violation
//! - update/replace: UPDATE, returns the matched-row count
//! - delete: existence SELECT is a separate call, see `AgentStore::exists`

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};

use crate::db::{AgentStore, StoreError};
use crate::models::{Agent, AgentReplacement, Commission, NewAgent};

/// Agent record from database
#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
struct AgentRow {
    agent_code: String,
    agent_name: Option<String>,
    working_area: Option<String>,
    commission: Option<Decimal>,
    phone_no: Option<String>,
    country: Option<String>,
}

impl From<AgentRow> for Agent {
    fn from(r: AgentRow) -> Self {
        Self {
            agent_code: r.agent_code,
            agent_name: r.agent_name,
            working_area: r.working_area,
            commission: r.commission,
            phone_no: r.phone_no,
            country: r.country,
        }
    }
}

/// Agent repository backed by a MySQL pool
#[derive(Debug, Clone)]
pub struct AgentRepo {
    pool: MySqlPool,
}

impl AgentRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// MySQL reports changed rows, not matched rows, for UPDATE unless the
    /// client sets CLIENT_FOUND_ROWS. Writing the value a row already holds
    /// therefore reports zero; probe for the row before calling it a miss.
    async fn matched_rows(&self, rows_affected: u64, agent_code: &str) -> Result<u64, StoreError> {
        if rows_affected > 0 {
            return Ok(rows_affected);
        }
        Ok(u64::from(self.exists(agent_code).await?))
    }
}

#[async_trait]
impl AgentStore for AgentRepo {
    async fn list(&self) -> Result<Vec<Agent>, StoreError> {
        let rows: Vec<AgentRow> = sqlx::query_as(
            r#"
            SELECT AGENT_CODE, AGENT_NAME, WORKING_AREA, COMMISSION, PHONE_NO, COUNTRY
            FROM agents
            ORDER BY AGENT_CODE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Agent::from).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) AS total_agents FROM agents")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn average_commission(&self) -> Result<Option<Decimal>, StoreError> {
        let avg: Option<Decimal> =
            sqlx::query_scalar("SELECT AVG(COMMISSION) AS avg_commission FROM agents")
                .fetch_one(&self.pool)
                .await?;
        Ok(avg)
    }

    async fn insert(&self, agent: &NewAgent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO agents (AGENT_CODE, AGENT_NAME, WORKING_AREA, COMMISSION, PHONE_NO, COUNTRY)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&agent.agent_code)
        .bind(&agent.agent_name)
        .bind(&agent.working_area)
        .bind(agent.commission.as_decimal())
        .bind(&agent.phone_no)
        .bind(&agent.country)
        .execute(&self.pool)
        .await?;

        tracing::debug!(agent_code = %agent.agent_code, "agent inserted");
        Ok(())
    }

    async fn update_commission(
        &self,
        agent_code: &str,
        commission: Commission,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE agents SET COMMISSION = ? WHERE AGENT_CODE = ?")
            .bind(commission.as_decimal())
            .bind(agent_code)
            .execute(&self.pool)
            .await?;

        self.matched_rows(result.rows_affected(), agent_code).await
    }

    async fn replace(
        &self,
        agent_code: &str,
        replacement: &AgentReplacement,
    ) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE agents SET AGENT_NAME = ?, COMMISSION = ? WHERE AGENT_CODE = ?")
                .bind(&replacement.agent_name)
                .bind(replacement.commission.as_decimal())
                .bind(agent_code)
                .execute(&self.pool)
                .await?;

        self.matched_rows(result.rows_affected(), agent_code).await
    }

    async fn exists(&self, agent_code: &str) -> Result<bool, StoreError> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT AGENT_CODE FROM agents WHERE AGENT_CODE = ?")
                .bind(agent_code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    async fn delete(&self, agent_code: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM agents WHERE AGENT_CODE = ?")
            .bind(agent_code)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
