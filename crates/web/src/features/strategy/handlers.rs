use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::strategy::{StrategyHistoryEntry, StrategyUpdateResponse, UpdateStrategyRequest},
    models::ScoringStrategy,
    services::strategy,
};

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

#[utoipa::path(
    get,
    path = "/api/strategy",
    responses(
        (status = 200, description = "Current scoring weights", body = ScoringStrategy)
    ),
    tag = "strategy"
)]
pub async fn get_strategy(State(db): State<Database>) -> Result<Response, WebError> {
    let current = strategy::current(db.pool()).await?;

    Ok(Json(current).into_response())
}

#[utoipa::path(
    get,
    path = "/api/strategy/history",
    responses(
        (status = 200, description = "Strategy changes, newest first", body = Vec<StrategyHistoryEntry>)
    ),
    tag = "strategy"
)]
pub async fn get_history(State(db): State<Database>) -> Result<Response, WebError> {
    let changes = strategy::history(db.pool()).await?;

    let response: Vec<StrategyHistoryEntry> =
        changes.into_iter().map(StrategyHistoryEntry::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/strategy",
    request_body = UpdateStrategyRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Weights replaced and every submission rescored", body = StrategyUpdateResponse),
        (status = 400, description = "Negative weight"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "A stored submission could not be rescored; nothing changed")
    ),
    tag = "strategy"
)]
pub async fn update_strategy(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UpdateStrategyRequest>,
) -> Result<Response, WebError> {
    let actor = current.require()?;

    let response =
        strategy::update_strategy(db.pool(), actor, req.func_weight, req.comment_weight).await?;

    Ok(Json(response).into_response())
}
