use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::account::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    services::accounts,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{CurrentUser, bearer_token};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    ),
    tag = "accounts"
)]
pub async fn register(
    State(db): State<Database>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = accounts::register(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "accounts"
)]
pub async fn login(
    State(db): State<Database>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (token, user) = accounts::login(db.pool(), &req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "accounts"
)]
pub async fn logout(State(db): State<Database>, headers: HeaderMap) -> Result<Response, WebError> {
    let token = bearer_token(&headers).ok_or(WebError::Unauthorized)?;

    accounts::logout(db.pool(), token).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Authenticated account", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "accounts"
)]
pub async fn me(Extension(current): Extension<CurrentUser>) -> Result<Response, WebError> {
    let user = current.require()?.clone();

    Ok(Json(UserResponse::from(user)).into_response())
}
