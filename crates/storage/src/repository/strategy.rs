use sqlx::SqliteConnection;

use crate::error::{Result, StorageError};
use crate::models::{ScoringStrategy, StrategyChangeRecord};

const STRATEGY_ID: i64 = 1;

pub struct StrategyRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> StrategyRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn current(&mut self) -> Result<ScoringStrategy> {
        sqlx::query_as::<_, ScoringStrategy>(
            r#"
            SELECT func_weight, comment_weight
            FROM scoring_strategy
            WHERE strategy_id = ?
            "#,
        )
        .bind(STRATEGY_ID)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::UninitializedStore)
    }

    pub async fn set(&mut self, strategy: &ScoringStrategy) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE scoring_strategy
            SET func_weight = ?, comment_weight = ?
            WHERE strategy_id = ?
            "#,
        )
        .bind(strategy.func_weight)
        .bind(strategy.comment_weight)
        .bind(STRATEGY_ID)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::UninitializedStore);
        }

        Ok(())
    }

    pub async fn append_change(
        &mut self,
        actor_id: i64,
        previous: &ScoringStrategy,
        new: &ScoringStrategy,
    ) -> Result<i64> {
        let change_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO strategy_changes (
                actor_id, previous_func_weight, previous_comment_weight,
                new_func_weight, new_comment_weight
            )
            VALUES (?, ?, ?, ?, ?)
            RETURNING change_id
            "#,
        )
        .bind(actor_id)
        .bind(previous.func_weight)
        .bind(previous.comment_weight)
        .bind(new.func_weight)
        .bind(new.comment_weight)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(change_id)
    }

    /// Every strategy change, most recent first
    pub async fn history(&mut self) -> Result<Vec<StrategyChangeRecord>> {
        let history = sqlx::query_as::<_, StrategyChangeRecord>(
            r#"
            SELECT sc.change_id, sc.actor_id, u.username AS actor_name,
                   sc.previous_func_weight, sc.previous_comment_weight,
                   sc.new_func_weight, sc.new_comment_weight, sc.changed_at
            FROM strategy_changes sc
            INNER JOIN users u ON u.user_id = sc.actor_id
            ORDER BY sc.changed_at DESC, sc.change_id DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(history)
    }
}
