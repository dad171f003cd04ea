use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pinlog_common::{params::RegisterDeviceParams, views::{ApiErrorResponse, RegisterDeviceResponse}};
use pinlog_db::{
    models::DbUser,
    storage::{StoreError, UserFilter, UserStore},
};
use tracing::{debug, info, instrument};

use crate::{auth::generate_api_key, context::ApiContext, error::ApiError};


/// POST /auth
///
/// Register a device and return its API key. Registering an already known
/// device returns the key it was first issued.
#[utoipa::path(
    post,
    path = "/auth",
    tags = ["devices"],
    request_body(content = RegisterDeviceParams, content_type = "application/json"),
    responses(
        (status = 200, description = "API key for the device", body = RegisterDeviceResponse),
        (status = 400, description = "Unique ID is missing", body = ApiErrorResponse),
    )
)]
#[instrument(skip(ctx, body))]
pub async fn register_device(
    State(ctx): State<ApiContext>,
    body: Result<Json<RegisterDeviceParams>, JsonRejection>,
) -> Result<Json<RegisterDeviceResponse>, ApiError> {
    let params = body.map(|Json(params)| params).unwrap_or_else(|rejection| {
        debug!(%rejection, "Unreadable registration body");
        RegisterDeviceParams::default()
    });

    let unique_id = params
        .unique_id()
        .ok_or_else(|| ApiError::bad_request("Unique ID is required"))?
        .to_string();

    if let Some(existing) = UserStore::get(&*ctx.db, UserFilter::by_unique_id(&unique_id)).await? {
        debug!(
            %unique_id,
            registered_at = %existing.created_at(),
            "Device already registered, returning existing key"
        );
        return Ok(Json(RegisterDeviceResponse {
            api_key: existing.api_key,
        }));
    }

    let user = DbUser::new(unique_id.clone(), generate_api_key());

    let api_key = match UserStore::create(&*ctx.db, user).await {
        Ok(created) => {
            info!(%unique_id, user_id = ?created.id, "Registered new device");
            created.api_key
        }
        Err(StoreError::Conflict) => {
            // Lost the race against a concurrent registration of the same
            // device. The winner's key is the one that counts.
            debug!(%unique_id, "Concurrent registration detected, re-reading device");
            UserStore::get(&*ctx.db, UserFilter::by_unique_id(&unique_id))
                .await?
                .ok_or_else(|| anyhow::anyhow!("device {unique_id} missing after conflicting insert"))?
                .api_key
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(RegisterDeviceResponse { api_key }))
}
