//! Device credentials.
//!
//! A device is issued one API key at registration and presents it in the
//! `api-key` header on every submission. The key is an opaque bearer token:
//! there is no signature or expiry, only a lookup against the stored users.

pub mod api_key;
pub mod error;

use pinlog_db::{
    models::DbUser,
    storage::{Storage, UserFilter, UserStore},
};
use tracing::{debug, instrument};

pub use api_key::{API_KEY_HEADER, extract_api_key, generate_api_key};
pub use error::AuthError;

/// Resolve the device that owns `api_key`.
///
/// Unknown keys and keys that could never have been issued are both reported
/// as [`AuthError::InvalidCredentials`].
#[instrument(skip_all)]
pub async fn authenticate_device(db: &dyn Storage, api_key: &str) -> Result<DbUser, AuthError> {
    let user = UserStore::get(db, UserFilter::by_api_key(api_key))
        .await?
        .ok_or_else(|| {
            debug!("No device registered for API key");
            AuthError::InvalidCredentials
        })?;

    debug!(unique_id = %user.unique_id, "Device authenticated");
    Ok(user)
}
