use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        comment::{CommentView, CreateCommentRequest},
        submission::{SearchFilter, SubmissionDetail, SubmissionSummary, UploadSubmissionRequest},
    },
    models::{Comment, Submission},
    services::{comments, submissions},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

#[utoipa::path(
    get,
    path = "/api/submissions",
    params(SearchFilter),
    responses(
        (status = 200, description = "Approved submissions, highest score first", body = Vec<SubmissionSummary>)
    ),
    tag = "submissions"
)]
pub async fn search_submissions(
    State(db): State<Database>,
    Query(filter): Query<SearchFilter>,
) -> Result<Response, WebError> {
    let results = submissions::search(db.pool(), &filter).await?;

    Ok(Json(results).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = UploadSubmissionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Submission stored as pending", body = Submission),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Source text could not be parsed")
    ),
    tag = "submissions"
)]
pub async fn upload_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UploadSubmissionRequest>,
) -> Result<Response, WebError> {
    let owner = current.require()?;
    req.validate()?;

    let submission = submissions::upload(db.pool(), owner, &req).await?;

    Ok((StatusCode::CREATED, Json(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Submission with comment and download aggregates", body = SubmissionDetail),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn get_submission(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let detail = submissions::get_detail(db.pool(), id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}/download",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Source text", body = String, content_type = "text/x-python"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn download_submission(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let source = submissions::download(db.pool(), current.optional(), id).await?;

    Ok(([(header::CONTENT_TYPE, "text/x-python; charset=utf-8")], source).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}/comments",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Comments, oldest first", body = Vec<CommentView>),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn list_comments(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let list = comments::list_comments(db.pool(), id).await?;

    Ok(Json(list).into_response())
}

#[utoipa::path(
    post,
    path = "/api/submissions/{id}/comments",
    params(
        ("id" = i64, Path, description = "Submission id")
    ),
    request_body = CreateCommentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Comment added", body = Comment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found"),
        (status = 409, description = "Rating out of range")
    ),
    tag = "submissions"
)]
pub async fn add_comment(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Response, WebError> {
    let author = current.require()?;
    req.validate()?;

    let comment = comments::add_comment(db.pool(), author, id, &req).await?;

    Ok((StatusCode::CREATED, Json(comment)).into_response())
}
