use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for device registration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterDeviceParams {
    /// Identifier chosen by the device, typically derived from its MAC
    /// address or chip ID. Must be unique per device.
    #[serde(default, deserialize_with = "super::scalar_string")]
    pub unique_id: Option<String>,
}

impl RegisterDeviceParams {
    /// The unique ID, or `None` if it was absent or empty.
    pub fn unique_id(&self) -> Option<&str> {
        super::non_empty(&self.unique_id)
    }
}
