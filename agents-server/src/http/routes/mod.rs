//! Route handlers organized by resource

pub mod agents;
pub mod health;
pub mod stats;

use serde::Serialize;

/// Success body for mutations: `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
