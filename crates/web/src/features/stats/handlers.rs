use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::stats::PlatformStats, services::stats};

use crate::error::WebError;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Platform-wide counts", body = PlatformStats)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(db): State<Database>) -> Result<Response, WebError> {
    let stats = stats::get_stats(db.pool()).await?;

    Ok(Json(stats).into_response())
}
