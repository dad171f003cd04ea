//! Wire types shared between the pinlog API and the devices that talk to it.

pub mod params;
pub mod pin_state;
pub mod views;

pub use pin_state::{PinState, PinStateParseError};
