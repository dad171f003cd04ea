use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use pinlog_common::{
    params::SubmitSignalParams,
    views::{ApiErrorResponse, SignalSavedResponse},
};
use pinlog_db::{models::DbSignalReading, storage::SignalReadingStore};
use tracing::{debug, info, instrument};

use crate::{
    auth::{AuthError, authenticate_device, extract_api_key},
    context::ApiContext,
    error::ApiError,
};

#[cfg(test)]
mod tests;

/// POST /data
///
/// Store one pin-state reading for the device owning the `api-key` header.
///
/// Every field is checked before the key is looked up, so a malformed request
/// never touches the store.
#[utoipa::path(
    post,
    path = "/data",
    tags = ["signals"],
    request_body(content = SubmitSignalParams, content_type = "application/json"),
    params(
        ("api-key" = String, Header, description = "API key issued at registration"),
    ),
    responses(
        (status = 200, description = "Reading stored", body = SignalSavedResponse),
        (status = 400, description = "Missing fields or invalid pin state", body = ApiErrorResponse),
        (status = 403, description = "Unknown API key", body = ApiErrorResponse),
    )
)]
#[instrument(skip(ctx, headers, body))]
pub async fn submit_signal(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    body: Result<Json<SubmitSignalParams>, JsonRejection>,
) -> Result<Json<SignalSavedResponse>, ApiError> {
    let params = body.map(|Json(params)| params).unwrap_or_else(|rejection| {
        debug!(%rejection, "Unreadable signal body");
        SubmitSignalParams::default()
    });

    let api_key = extract_api_key(&headers).ok_or(AuthError::MissingCredentials)?;
    let submission = params
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let user = authenticate_device(&*ctx.db, &api_key).await?;
    let user_id = user
        .id
        .ok_or_else(|| anyhow::anyhow!("stored device {} has no ID", user.unique_id))?;

    let reading = DbSignalReading::new(user_id, submission.timestamp, submission.pin_state);
    let created = SignalReadingStore::create(&*ctx.db, reading).await?;

    info!(
        %user_id,
        reading_id = ?created.id,
        pin_state = %created.pin_state,
        "Signal reading stored"
    );

    Ok(Json(SignalSavedResponse::default()))
}
