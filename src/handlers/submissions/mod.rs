//! Submission query handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get-all-submission", get(handler::list_submissions))
        .route("/get-submission/{problem_id}", get(handler::list_problem_submissions))
        .route("/get-submission-count/{problem_id}", get(handler::count_submissions))
        .route("/details/{id}", get(handler::get_submission))
}
