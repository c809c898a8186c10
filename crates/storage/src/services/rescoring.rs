use sqlx::{SqliteConnection, SqlitePool};

use crate::dto::strategy::RescoreResponse;
use crate::error::{Result, StorageError};
use crate::models::{ScoringStrategy, User};
use crate::repository::strategy::StrategyRepository;
use crate::repository::submission::SubmissionRepository;

use super::authorization::require_admin;
use super::scoring;

/// Recompute and store the score of every submission under `strategy`.
///
/// Runs on the caller's connection, normally inside the transaction that
/// changed the strategy. All scores are computed before anything is written;
/// the first submission whose source no longer parses aborts the batch with
/// [`StorageError::Rescore`], and the caller's rollback leaves every score
/// as it was.
pub async fn recompute_all(conn: &mut SqliteConnection, strategy: &ScoringStrategy) -> Result<u64> {
    let sources = SubmissionRepository::new(&mut *conn).list_sources().await?;

    let mut scores = Vec::with_capacity(sources.len());
    for (submission_id, source_text) in &sources {
        let score = scoring::score_source(source_text, strategy).map_err(|source| {
            StorageError::Rescore {
                submission_id: *submission_id,
                source,
            }
        })?;
        scores.push((*submission_id, score));
    }

    let mut repo = SubmissionRepository::new(conn);
    for (submission_id, score) in &scores {
        repo.update_score(*submission_id, *score).await?;
    }

    Ok(scores.len() as u64)
}

/// Rescore every submission under the current strategy without changing it
pub async fn recompute_current(pool: &SqlitePool, actor: &User) -> Result<RescoreResponse> {
    require_admin(actor, "rescore submissions")?;

    let mut tx = pool.begin().await?;
    let strategy = StrategyRepository::new(&mut *tx).current().await?;
    let rescored_count = recompute_all(&mut *tx, &strategy).await?;
    tx.commit().await?;

    tracing::info!(
        actor_id = actor.user_id,
        rescored_count,
        "Rescored all submissions under the current strategy"
    );

    Ok(RescoreResponse {
        strategy,
        rescored_count,
    })
}
