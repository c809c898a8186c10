use sqlx::SqlitePool;

use crate::dto::comment::{CommentView, CreateCommentRequest, MAX_RATING, MIN_RATING};
use crate::error::{Result, StorageError};
use crate::models::{Comment, User};
use crate::repository::comment::CommentRepository;
use crate::repository::submission::SubmissionRepository;

use super::authorization::require_admin;

/// Add a rated comment to a submission.
///
/// A submission deleted concurrently makes the insert fail on its foreign
/// key, reported as `NotFound`.
pub async fn add_comment(
    pool: &SqlitePool,
    author: &User,
    submission_id: i64,
    req: &CreateCommentRequest,
) -> Result<Comment> {
    if !(MIN_RATING..=MAX_RATING).contains(&req.rating) {
        return Err(StorageError::ConstraintViolation(format!(
            "rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }

    let mut conn = pool.acquire().await?;
    CommentRepository::new(&mut conn)
        .create(submission_id, author.user_id, req.rating, &req.content)
        .await
        .map_err(|err| {
            if err.is_foreign_key_violation() {
                StorageError::NotFound
            } else {
                err
            }
        })
}

pub async fn list_comments(pool: &SqlitePool, submission_id: i64) -> Result<Vec<CommentView>> {
    let mut conn = pool.acquire().await?;
    SubmissionRepository::new(&mut conn)
        .find_by_id(submission_id)
        .await?;
    CommentRepository::new(&mut conn)
        .list_for_submission(submission_id)
        .await
}

pub async fn delete_comment(pool: &SqlitePool, actor: &User, comment_id: i64) -> Result<()> {
    require_admin(actor, "delete comments")?;

    let mut conn = pool.acquire().await?;
    CommentRepository::new(&mut conn).delete(comment_id).await?;

    tracing::info!(actor_id = actor.user_id, comment_id, "Comment deleted");

    Ok(())
}
