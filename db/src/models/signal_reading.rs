use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use pinlog_common::PinState;
use serde::{Deserialize, Serialize};

/// One pin-state sample submitted by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbSignalReading {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Foreign key to DbUser
    #[serde(rename = "userID")]
    pub user_id: ObjectId,

    /// When the reading was taken, verbatim from the device
    pub timestamp: String,

    #[serde(rename = "pinState")]
    pub pin_state: PinState,

    /// When the server accepted the reading
    #[serde(rename = "receivedAt", with = "chrono_datetime_as_bson_datetime")]
    pub received_at: DateTime<Utc>,
}

impl DbSignalReading {
    pub fn new(user_id: ObjectId, timestamp: String, pin_state: PinState) -> Self {
        Self {
            id: None,
            user_id,
            timestamp,
            pin_state,
            received_at: Utc::now(),
        }
    }
}
