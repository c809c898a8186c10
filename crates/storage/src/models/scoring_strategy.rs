use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Weights applied to a submission's feature vector.
///
/// Exactly one row exists once the schema is migrated. Score formula:
/// score = function_count × func_weight + comment_count × comment_weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoringStrategy {
    pub func_weight: i64,
    pub comment_weight: i64,
}

impl ScoringStrategy {
    pub fn new(func_weight: i64, comment_weight: i64) -> Self {
        Self {
            func_weight,
            comment_weight,
        }
    }
}

/// Immutable record of one strategy update, joined with the actor's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StrategyChangeRecord {
    pub change_id: i64,
    pub actor_id: i64,
    pub actor_name: String,
    pub previous_func_weight: i64,
    pub previous_comment_weight: i64,
    pub new_func_weight: i64,
    pub new_comment_weight: i64,
    pub changed_at: chrono::NaiveDateTime,
}

impl StrategyChangeRecord {
    pub fn previous(&self) -> ScoringStrategy {
        ScoringStrategy::new(self.previous_func_weight, self.previous_comment_weight)
    }

    pub fn new_weights(&self) -> ScoringStrategy {
        ScoringStrategy::new(self.new_func_weight, self.new_comment_weight)
    }

    pub fn describe(&self) -> String {
        format!(
            "update_scoring(func={}, comment={})",
            self.new_func_weight, self.new_comment_weight
        )
    }
}
