use std::fmt::Display;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A registered device identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Identifier supplied by the device at registration. Unique.
    #[serde(rename = "uniqueID")]
    pub unique_id: String,

    /// Key issued at registration, never changed afterwards.
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl Display for DbUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key left out on purpose, this ends up in logs
        write!(
            f,
            "DbUser {{ id: {:?}, unique_id: {} }}",
            self.id, self.unique_id
        )
    }
}

impl DbUser {
    pub fn new(unique_id: String, api_key: String) -> Self {
        Self {
            id: None,
            unique_id,
            api_key,
        }
    }

    /// Get the creation time of this user based on the ObjectId's timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        if let Some(id) = self.id {
            id.timestamp().to_chrono()
        } else {
            Utc::now()
        }
    }
}
