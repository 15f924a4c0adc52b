//! LeetShaastra judge backend - application entry point

use std::{net::SocketAddr, time::Duration};

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leetshaastra::{
    config::CONFIG,
    constants::{API_BASE_PATH, MAX_REQUEST_BODY_BYTES},
    db, handlers,
    judge::JudgeClient,
    middleware::logging_middleware,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LeetShaastra judge backend...");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    let judge = JudgeClient::from_config(&CONFIG.judge)?;
    tracing::info!(
        judge_url = %CONFIG.judge.base_url,
        poll_timeout_secs = CONFIG.judge.poll_timeout.as_secs(),
        max_batch_size = CONFIG.judge.max_batch_size,
        "Judge client ready"
    );

    let state = AppState::new(db_pool, judge, CONFIG.clone());

    // Leave room for a full judge wait before cutting the request off
    let request_timeout = CONFIG.judge.poll_timeout + Duration::from_secs(30);

    let app = Router::new()
        .nest(API_BASE_PATH, handlers::routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(logging_middleware))
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .map_response(|res: axum::response::Response<_>| res.map(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state);

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
