use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement for a stored signal reading.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignalSavedResponse {
    pub message: String,
}

impl SignalSavedResponse {
    pub const MESSAGE: &'static str = "Signal data saved successfully";
}

impl Default for SignalSavedResponse {
    fn default() -> Self {
        Self {
            message: Self::MESSAGE.into(),
        }
    }
}
