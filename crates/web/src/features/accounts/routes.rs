use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{login, logout, me, register};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
