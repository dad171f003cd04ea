//! Input parameters for the pinlog endpoints.
//!
//! Required fields are modelled as `Option` so that a missing field reaches
//! the handler and is reported the same way as an empty one, instead of being
//! rejected by the JSON extractor. Scalar values of any JSON type are accepted
//! and kept as their string form, so a device sending `"timestamp": 1700000000`
//! is stored rather than refused.

use serde::{Deserialize, Deserializer};

mod device;
pub use device::*;

mod signal;
pub use signal::*;

/// Returns the value if it is present and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::String(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Deserialize an optional JSON scalar into its string form. `null` is `None`;
/// arrays and objects are rejected.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}
