use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// The level of a digital pin at the time a reading was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinState {
    High,
    Low,
}

impl PinState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinState::High => "HIGH",
            PinState::Low => "LOW",
        }
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pin_state must be one of HIGH, LOW (got {0:?})")]
pub struct PinStateParseError(pub String);

impl FromStr for PinState {
    type Err = PinStateParseError;

    /// Only the exact upper-case spellings are accepted, matching what is
    /// stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(PinState::High),
            "LOW" => Ok(PinState::Low),
            other => Err(PinStateParseError(other.to_string())),
        }
    }
}
