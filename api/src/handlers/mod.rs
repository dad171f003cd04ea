use axum::extract::State;

use crate::{context::ApiContext, error::ApiError};

pub mod devices;
pub mod signals;

#[cfg(test)]
pub(crate) mod testing;


#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses((status = 200, description = "Service and store are reachable", body = String))
)]
pub async fn health_check(State(ctx): State<ApiContext>) -> Result<&'static str, ApiError> {
    ctx.db.ping().await?;
    Ok("Healthy")
}
