use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Reported to the caller the same way as any other missing field.
    #[error("Missing required fields")]
    MissingCredentials,

    #[error("Invalid API key")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] pinlog_db::storage::StoreError),
}
