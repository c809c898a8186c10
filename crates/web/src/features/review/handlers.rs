use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        review::{AuditLogFilter, ReviewRequest},
        strategy::RescoreResponse,
        submission::SubmissionSummary,
    },
    models::{ReviewAuditRecord, Submission},
    services::{comments, rescoring, review},
};

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

#[utoipa::path(
    get,
    path = "/api/admin/pending",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending submissions, oldest first", body = Vec<SubmissionSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required")
    ),
    tag = "admin"
)]
pub async fn list_pending(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let actor = current.require()?;

    let pending = review::list_pending(db.pool(), actor).await?;

    Ok(Json(pending).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/submissions/{id}/review",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    request_body = ReviewRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submission reviewed", body = Submission),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Submission not found")
    ),
    tag = "admin"
)]
pub async fn review_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Response, WebError> {
    let actor = current.require()?;

    let submission = review::review(db.pool(), actor, id, req.action).await?;

    Ok(Json(submission).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Submission deleted with its comments and download records"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Submission not found")
    ),
    tag = "admin"
)]
pub async fn delete_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let actor = current.require()?;

    review::delete_submission(db.pool(), actor, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/comments/{id}",
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Comment not found")
    ),
    tag = "admin"
)]
pub async fn delete_comment(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let actor = current.require()?;

    comments::delete_comment(db.pool(), actor, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/audit-log",
    params(AuditLogFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Review audit log, newest first", body = Vec<ReviewAuditRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required")
    ),
    tag = "admin"
)]
pub async fn audit_log(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Query(filter): Query<AuditLogFilter>,
) -> Result<Response, WebError> {
    let actor = current.require()?;

    let entries = review::audit_log(db.pool(), actor, filter.submission_id).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/rescore",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every submission rescored with the current strategy", body = RescoreResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "A stored submission could not be rescored")
    ),
    tag = "admin"
)]
pub async fn rescore(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let actor = current.require()?;

    let response = rescoring::recompute_current(db.pool(), actor).await?;

    Ok(Json(response).into_response())
}
