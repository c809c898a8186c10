use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ScoringStrategy, StrategyChangeRecord};

/// New weights for the scoring strategy.
///
/// Range checks happen in the strategy service so that negative weights
/// surface as `InvalidWeight`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStrategyRequest {
    pub func_weight: i64,
    pub comment_weight: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StrategyUpdateResponse {
    pub previous: ScoringStrategy,
    pub current: ScoringStrategy,
    pub rescored_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RescoreResponse {
    pub strategy: ScoringStrategy,
    pub rescored_count: u64,
}

/// One strategy change as shown in the history, with its action label
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StrategyHistoryEntry {
    #[serde(flatten)]
    pub change: StrategyChangeRecord,
    /// e.g. `update_scoring(func=5, comment=1)`
    pub action: String,
}

impl From<StrategyChangeRecord> for StrategyHistoryEntry {
    fn from(change: StrategyChangeRecord) -> Self {
        let action = change.describe();
        Self { change, action }
    }
}
