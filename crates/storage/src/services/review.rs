//! Administrative review workflow.
//!
//! `pending → approved | rejected`, with re-review of an already reviewed
//! submission allowed in either direction. Every transition and every
//! deletion appends a review audit record in the same transaction as the
//! change itself.

use sqlx::SqlitePool;

use crate::dto::review::ReviewDecision;
use crate::dto::submission::SubmissionSummary;
use crate::error::Result;
use crate::models::{ReviewAction, ReviewAuditRecord, Submission, SubmissionStatus, User};
use crate::repository::audit::AuditRepository;
use crate::repository::submission::SubmissionRepository;

use super::authorization::require_admin;

/// Set a submission's status and log the decision
pub async fn review(
    pool: &SqlitePool,
    actor: &User,
    submission_id: i64,
    decision: ReviewDecision,
) -> Result<Submission> {
    require_admin(actor, "review submissions")?;

    let mut tx = pool.begin().await?;

    let previous_status = SubmissionRepository::new(&mut tx)
        .find_by_id(submission_id)
        .await?
        .status;
    let submission = SubmissionRepository::new(&mut tx)
        .update_status(submission_id, decision.status())
        .await?;
    AuditRepository::new(&mut tx)
        .append(actor.user_id, decision.into(), submission_id)
        .await?;

    tx.commit().await?;

    tracing::info!(
        actor_id = actor.user_id,
        submission_id,
        from = %previous_status,
        to = %submission.status,
        "Submission reviewed"
    );

    Ok(submission)
}

/// Delete a submission together with its comments and download records
pub async fn delete_submission(pool: &SqlitePool, actor: &User, submission_id: i64) -> Result<()> {
    require_admin(actor, "delete submissions")?;

    let mut tx = pool.begin().await?;

    SubmissionRepository::new(&mut tx).delete(submission_id).await?;
    AuditRepository::new(&mut tx)
        .append(actor.user_id, ReviewAction::Deleted, submission_id)
        .await?;

    tx.commit().await?;

    tracing::info!(actor_id = actor.user_id, submission_id, "Submission deleted");

    Ok(())
}

/// Submissions waiting for review, oldest first
pub async fn list_pending(pool: &SqlitePool, actor: &User) -> Result<Vec<SubmissionSummary>> {
    require_admin(actor, "list pending submissions")?;

    let mut conn = pool.acquire().await?;
    SubmissionRepository::new(&mut conn)
        .list_by_status(SubmissionStatus::Pending)
        .await
}

/// Review audit log, newest first, optionally narrowed to one submission
pub async fn audit_log(
    pool: &SqlitePool,
    actor: &User,
    submission_id: Option<i64>,
) -> Result<Vec<ReviewAuditRecord>> {
    require_admin(actor, "read the review audit log")?;

    let mut conn = pool.acquire().await?;
    AuditRepository::new(&mut conn).list(submission_id).await
}
