//! Problem handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-problem", post(handler::create_problem))
        .route("/get-all-problem", get(handler::list_problems))
        .route("/get-problem/{id}", get(handler::get_problem))
        .route("/update-problem/{id}", put(handler::update_problem))
        .route("/delete-problem/{id}", delete(handler::delete_problem))
        .route("/get-solved-problem", get(handler::list_solved_problems))
        .route("/mark-solved/{id}", post(handler::mark_solved))
}
