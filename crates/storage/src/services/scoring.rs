use crate::models::ScoringStrategy;

use super::features::{self, FeatureVector, ParseError};

/// Linear score of a feature vector under `strategy`.
///
/// score = function_count × func_weight + comment_count × comment_weight
pub fn score(features: &FeatureVector, strategy: &ScoringStrategy) -> f64 {
    features.function_count as f64 * strategy.func_weight as f64
        + features.comment_count as f64 * strategy.comment_weight as f64
}

/// Extract and score `source` in one step.
pub fn score_source(source: &str, strategy: &ScoringStrategy) -> Result<f64, ParseError> {
    let features = features::extract(source)?;
    Ok(score(&features, strategy))
}
