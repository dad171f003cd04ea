use axum::http::HeaderMap;
use rand::RngCore;

/// Header devices put their key in.
pub const API_KEY_HEADER: &str = "api-key";

/// Random bytes per key. 16 bytes gives 128 bits of entropy and a
/// 32-character hex string.
pub const API_KEY_BYTES: usize = 16;

/// Generate a new API key as a lowercase hex string.
///
/// Uses the thread-local CSPRNG, which is seeded from the operating system.
/// If the OS cannot provide randomness the RNG panics; there is no sensible
/// way to keep issuing credentials in that state.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Extract the API key from the request headers.
///
/// Returns `None` when the header is absent, empty, or not visible ASCII.
pub fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)?
        .to_str()
        .ok()
        .filter(|key| !key.is_empty())
        .map(|key| key.to_string())
}
