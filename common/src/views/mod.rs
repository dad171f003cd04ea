//! Output views for the pinlog endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod device;
pub use device::*;

mod signal;
pub use signal::*;

/// An error response for an API endpoint. This is used to return errors to the
/// client in a consistent format.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// An error code that can be used to identify the type of error that
    /// occurred.
    pub code: Option<String>,

    /// A human-readable message describing the error that occurred.
    pub error: String,
}
