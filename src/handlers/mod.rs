//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod execute;
pub mod health;
pub mod problems;
pub mod submissions;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
///
/// Everything except the health check requires a bearer token.
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(execute::routes())
        .nest("/submission", submissions::routes())
        .nest("/problems", problems::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(health::routes()).merge(protected)
}
