use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    add_comment, download_submission, get_submission, list_comments, search_submissions,
    upload_submission,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(search_submissions).post(upload_submission))
        .route("/:id", get(get_submission))
        .route("/:id/download", get(download_submission))
        .route("/:id/comments", get(list_comments).post(add_comment))
}
