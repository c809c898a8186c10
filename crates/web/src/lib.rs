use axum::{Json, Router, routing::get};
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

use crate::middleware::auth::resolve_user;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::accounts::handlers::register,
        features::accounts::handlers::login,
        features::accounts::handlers::logout,
        features::accounts::handlers::me,
        features::submissions::handlers::search_submissions,
        features::submissions::handlers::upload_submission,
        features::submissions::handlers::get_submission,
        features::submissions::handlers::download_submission,
        features::submissions::handlers::list_comments,
        features::submissions::handlers::add_comment,
        features::review::handlers::list_pending,
        features::review::handlers::review_submission,
        features::review::handlers::delete_submission,
        features::review::handlers::delete_comment,
        features::review::handlers::audit_log,
        features::review::handlers::rescore,
        features::strategy::handlers::get_strategy,
        features::strategy::handlers::get_history,
        features::strategy::handlers::update_strategy,
        features::stats::handlers::get_stats,
    ),
    components(
        schemas(
            storage::dto::account::RegisterRequest,
            storage::dto::account::LoginRequest,
            storage::dto::account::UserResponse,
            storage::dto::account::LoginResponse,
            storage::dto::comment::CreateCommentRequest,
            storage::dto::comment::CommentView,
            storage::dto::review::ReviewDecision,
            storage::dto::review::ReviewRequest,
            storage::dto::stats::PlatformStats,
            storage::dto::strategy::UpdateStrategyRequest,
            storage::dto::strategy::StrategyUpdateResponse,
            storage::dto::strategy::RescoreResponse,
            storage::dto::strategy::StrategyHistoryEntry,
            storage::dto::submission::UploadSubmissionRequest,
            storage::dto::submission::SubmissionSummary,
            storage::dto::submission::SubmissionDetail,
            storage::models::Role,
            storage::models::Submission,
            storage::models::SubmissionStatus,
            storage::models::Comment,
            storage::models::ScoringStrategy,
            storage::models::StrategyChangeRecord,
            storage::models::ReviewAction,
            storage::models::ReviewAuditRecord,
        )
    ),
    tags(
        (name = "accounts", description = "Registration and sessions"),
        (name = "submissions", description = "Upload, browse, download and comment"),
        (name = "admin", description = "Review workflow and moderation"),
        (name = "strategy", description = "Scoring strategy and its history"),
        (name = "stats", description = "Platform statistics"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Session token")
                        .build(),
                ),
            )
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full API router over `db`
pub fn app(db: Database) -> Router {
    let api = Router::new()
        .nest("/auth", features::accounts::routes::routes())
        .nest("/submissions", features::submissions::routes::routes())
        .nest("/admin", features::review::routes::routes())
        .nest("/strategy", features::strategy::routes::routes())
        .nest("/stats", features::stats::routes::routes())
        .layer(axum::middleware::from_fn_with_state(db.clone(), resolve_user));

    Router::new()
        .nest("/api", api)
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .with_state(db)
}
