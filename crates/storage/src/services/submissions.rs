use sqlx::SqlitePool;

use crate::dto::submission::{
    SearchFilter, SubmissionDetail, SubmissionSummary, UploadSubmissionRequest,
};
use crate::error::Result;
use crate::models::{Submission, User};
use crate::repository::download::DownloadRepository;
use crate::repository::strategy::StrategyRepository;
use crate::repository::submission::SubmissionRepository;

use super::{features, scoring};

/// Store a new pending submission, scored under the current strategy.
///
/// Source that does not parse is rejected with `StorageError::Parse` and
/// nothing is stored.
pub async fn upload(
    pool: &SqlitePool,
    owner: &User,
    req: &UploadSubmissionRequest,
) -> Result<Submission> {
    let features = features::extract(&req.source_text)?;

    let mut tx = pool.begin().await?;
    let strategy = StrategyRepository::new(&mut tx).current().await?;
    let score = scoring::score(&features, &strategy);
    let submission = SubmissionRepository::new(&mut tx)
        .create(owner.user_id, req, score)
        .await?;
    tx.commit().await?;

    tracing::info!(
        submission_id = submission.submission_id,
        owner_id = owner.user_id,
        function_count = features.function_count,
        comment_count = features.comment_count,
        score,
        "Submission uploaded"
    );

    Ok(submission)
}

/// Approved submissions matching the filter
pub async fn search(pool: &SqlitePool, filter: &SearchFilter) -> Result<Vec<SubmissionSummary>> {
    let mut conn = pool.acquire().await?;
    SubmissionRepository::new(&mut conn).search_approved(filter).await
}

pub async fn get_detail(pool: &SqlitePool, submission_id: i64) -> Result<SubmissionDetail> {
    let mut conn = pool.acquire().await?;
    SubmissionRepository::new(&mut conn)
        .find_detail(submission_id)
        .await
}

/// Return the source text and record the download.
///
/// Anonymous callers are recorded without a user id.
pub async fn download(pool: &SqlitePool, user: Option<&User>, submission_id: i64) -> Result<String> {
    let mut tx = pool.begin().await?;
    let submission = SubmissionRepository::new(&mut tx)
        .find_by_id(submission_id)
        .await?;
    DownloadRepository::new(&mut tx)
        .record(submission_id, user.map(|u| u.user_id))
        .await?;
    tx.commit().await?;

    Ok(submission.source_text)
}
