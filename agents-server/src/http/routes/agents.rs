//! Agent endpoints
//!
//! Each handler validates its input, runs one store operation and maps the
//! outcome:
//! - validation failure → 400
//! - zero matched rows → 404
//! - store failure → 500 (via `ApiError::Persistence`)

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, patch, put},
    Json, Router,
};

use super::MessageResponse;
use crate::http::error::{ApiError, ALL_FIELDS_REQUIRED, INVALID_DATA};
use crate::http::extractors::{AgentCode, JsonObject};
use crate::http::server::AppState;
use crate::models::{commission_update_from_body, Agent, AgentReplacement, NewAgent};

/// GET /agents - list all agents
async fn list_agents(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Agent>>, ApiError> {
    let agents = state.store.list().await?;
    Ok(Json(agents))
}

/// POST /agents - create an agent
async fn create_agent(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<Json<MessageResponse>, ApiError> {
    let agent =
        NewAgent::from_body(&body).map_err(|e| ApiError::invalid(ALL_FIELDS_REQUIRED, e))?;

    state.store.insert(&agent).await?;
    tracing::info!(agent_code = %agent.agent_code, "agent created");

    Ok(Json(MessageResponse::new("Agent added successfully!")))
}

/// PATCH /agents/{agent_code}/commission - update commission only
async fn update_commission(
    State(state): State<Arc<AppState>>,
    AgentCode(code): AgentCode,
    JsonObject(body): JsonObject,
) -> Result<Json<MessageResponse>, ApiError> {
    let commission =
        commission_update_from_body(&body).map_err(|e| ApiError::invalid(INVALID_DATA, e))?;

    let matched = state.store.update_commission(&code, commission).await?;
    if matched == 0 {
        return Err(ApiError::agent_not_found(code));
    }

    Ok(Json(MessageResponse::new("Commission updated successfully!")))
}

/// PUT /agents/{agent_code} - replace name and commission
async fn replace_agent(
    State(state): State<Arc<AppState>>,
    AgentCode(code): AgentCode,
    JsonObject(body): JsonObject,
) -> Result<Json<MessageResponse>, ApiError> {
    let replacement =
        AgentReplacement::from_body(&body).map_err(|e| ApiError::invalid(INVALID_DATA, e))?;

    let matched = state.store.replace(&code, &replacement).await?;
    if matched == 0 {
        return Err(ApiError::agent_not_found(code));
    }

    Ok(Json(MessageResponse::new("Agent data replaced successfully!")))
}

/// DELETE /agents/{agent_code} - delete after an existence check
///
/// The check and the delete are separate statements. A concurrent delete
/// that lands in between makes ours remove nothing, which is reported as
/// 404 as well.
async fn delete_agent(
    State(state): State<Arc<AppState>>,
    AgentCode(code): AgentCode,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.exists(&code).await? {
        return Err(ApiError::agent_not_found(code));
    }

    let deleted = state.store.delete(&code).await?;
    if deleted == 0 {
        tracing::warn!(agent_code = %code, "agent vanished between existence check and delete");
        return Err(ApiError::agent_not_found(code));
    }

    tracing::info!(agent_code = %code, "agent deleted");
    Ok(Json(MessageResponse::new("Agent deleted successfully!")))
}

/// Agent routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/agents", get(list_agents).post(create_agent))
        .route("/agents/{agent_code}", put(replace_agent).delete(delete_agent))
        .route("/agents/{agent_code}/commission", patch(update_commission))
}
