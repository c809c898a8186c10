use sqlx::SqlitePool;

use crate::dto::strategy::StrategyUpdateResponse;
use crate::error::{Result, StorageError};
use crate::models::{ScoringStrategy, StrategyChangeRecord, User};
use crate::repository::strategy::StrategyRepository;

use super::authorization::require_admin;
use super::rescoring;

/// The strategy currently used to score submissions
pub async fn current(pool: &SqlitePool) -> Result<ScoringStrategy> {
    let mut conn = pool.acquire().await?;
    StrategyRepository::new(&mut conn).current().await
}

/// Strategy change records, most recent first
pub async fn history(pool: &SqlitePool) -> Result<Vec<StrategyChangeRecord>> {
    let mut conn = pool.acquire().await?;
    StrategyRepository::new(&mut conn).history().await
}

/// Replace the scoring weights and rescore every submission.
///
/// The weight change, its change record and every new score are one
/// transaction: if any stored submission cannot be rescored the strategy is
/// left untouched and [`StorageError::Rescore`] is returned.
pub async fn update_strategy(
    pool: &SqlitePool,
    actor: &User,
    func_weight: i64,
    comment_weight: i64,
) -> Result<StrategyUpdateResponse> {
    require_admin(actor, "update the scoring strategy")?;
    let new = validate_weights(func_weight, comment_weight)?;

    let mut tx = pool.begin().await?;

    let mut repo = StrategyRepository::new(&mut tx);
    let previous = repo.current().await?;
    repo.set(&new).await?;
    let change_id = repo.append_change(actor.user_id, &previous, &new).await?;

    let rescored_count = match rescoring::recompute_all(&mut tx, &new).await {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!(
                actor_id = actor.user_id,
                error = %err,
                "Strategy update rolled back, rescoring failed"
            );
            return Err(err);
        }
    };

    tx.commit().await?;

    tracing::info!(
        actor_id = actor.user_id,
        change_id,
        previous_func_weight = previous.func_weight,
        previous_comment_weight = previous.comment_weight,
        func_weight = new.func_weight,
        comment_weight = new.comment_weight,
        rescored_count,
        "Scoring strategy updated"
    );

    Ok(StrategyUpdateResponse {
        previous,
        current: new,
        rescored_count,
    })
}

fn validate_weights(func_weight: i64, comment_weight: i64) -> Result<ScoringStrategy> {
    if func_weight < 0 {
        return Err(StorageError::InvalidWeight {
            field: "func_weight",
            value: func_weight,
        });
    }
    if comment_weight < 0 {
        return Err(StorageError::InvalidWeight {
            field: "comment_weight",
            value: comment_weight,
        });
    }

    Ok(ScoringStrategy::new(func_weight, comment_weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_weights_are_accepted() {
        assert_eq!(validate_weights(0, 0).unwrap(), ScoringStrategy::new(0, 0));
        assert_eq!(validate_weights(5, 2).unwrap(), ScoringStrategy::new(5, 2));
    }

    #[test]
    fn negative_weight_names_the_field() {
        assert!(matches!(
            validate_weights(-1, 3),
            Err(StorageError::InvalidWeight {
                field: "func_weight",
                value: -1
            })
        ));
        assert!(matches!(
            validate_weights(3, -4),
            Err(StorageError::InvalidWeight {
                field: "comment_weight",
                value: -4
            })
        ));
    }
}
