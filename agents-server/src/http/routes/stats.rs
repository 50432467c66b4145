//! Aggregate endpoints over the agents table

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::commission;

/// Row count response
#[derive(Debug, Serialize)]
pub struct TotalAgentsResponse {
    pub total_agents: i64,
}

/// Average commission response, `null` for an empty table
#[derive(Debug, Serialize)]
pub struct AvgCommissionResponse {
    #[serde(serialize_with = "commission::serialize_optional")]
    pub avg_commission: Option<Decimal>,
}

/// GET /total-agents
async fn total_agents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TotalAgentsResponse>, ApiError> {
    let total_agents = state.store.count().await?;
    Ok(Json(TotalAgentsResponse { total_agents }))
}

/// GET /avg-commission
async fn avg_commission(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AvgCommissionResponse>, ApiError> {
    let avg_commission = state.store.average_commission().await?;
    Ok(Json(AvgCommissionResponse { avg_commission }))
}

/// Aggregate routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/total-agents", get(total_agents))
        .route("/avg-commission", get(avg_commission))
}
