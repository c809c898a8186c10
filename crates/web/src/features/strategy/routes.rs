use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_history, get_strategy, update_strategy};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(get_strategy).put(update_strategy))
        .route("/history", get(get_history))
}
