use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for device registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterDeviceResponse {
    /// The key the device must send in the `api-key` header when submitting
    /// readings. Registering the same device again returns the same key.
    pub api_key: String,
}
