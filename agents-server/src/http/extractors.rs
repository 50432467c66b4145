//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::{Map, Value};

use super::error::{ApiError, INVALID_DATA};

/// Extract the `{agent_code}` path segment
pub struct AgentCode(pub String);

impl<S> FromRequestParts<S> for AgentCode
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(code): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::invalid(INVALID_DATA, rejection.body_text()))?;

        Ok(Self(code))
    }
}

/// Extract a JSON request body as a field map.
///
/// Unreadable JSON (or a missing JSON content type) is rejected as invalid
/// input. A well-formed body that is not an object yields an empty map, so
/// the per-route validator reports its own message for the missing fields.
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid(INVALID_DATA, rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Ok(Self(Map::new())),
        }
    }
}
