//! Status check records

use chrono::{DateTime, Utc};
use dreamtell_common::uuid_utils;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// POST /api/status request body
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// A stored status check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: String) -> Self {
        Self {
            id: uuid_utils::generate(),
            client_name,
            timestamp: dreamtell_common::time::now(),
        }
    }
}
