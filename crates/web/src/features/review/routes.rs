use axum::{
    Router,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{
    audit_log, delete_comment, delete_submission, list_pending, rescore, review_submission,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/pending", get(list_pending))
        .route("/submissions/:id/review", post(review_submission))
        .route("/submissions/:id", delete(delete_submission))
        .route("/comments/:id", delete(delete_comment))
        .route("/audit-log", get(audit_log))
        .route("/rescore", post(rescore))
}
