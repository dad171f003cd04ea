use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{PinState, PinStateParseError};

/// Request body for submitting a signal reading.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct SubmitSignalParams {
    /// When the reading was taken, as reported by the device.
    #[serde(default, deserialize_with = "super::scalar_string")]
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: Option<String>,

    /// The pin level, `HIGH` or `LOW`.
    #[serde(default, deserialize_with = "super::scalar_string")]
    #[schema(example = "HIGH")]
    pub pin_state: Option<String>,
}

/// A signal submission with every required field present and the pin state
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSubmission {
    pub timestamp: String,
    pub pin_state: PinState,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalParamsError {
    #[error("Missing required fields")]
    Missing,

    #[error(transparent)]
    InvalidPinState(#[from] PinStateParseError),
}

impl SubmitSignalParams {
    /// Checks presence of both fields first, then the pin state value.
    pub fn validate(&self) -> Result<SignalSubmission, SignalParamsError> {
        let timestamp = super::non_empty(&self.timestamp).ok_or(SignalParamsError::Missing)?;
        let pin_state = super::non_empty(&self.pin_state).ok_or(SignalParamsError::Missing)?;

        Ok(SignalSubmission {
            timestamp: timestamp.to_string(),
            pin_state: pin_state.parse()?,
        })
    }
}
