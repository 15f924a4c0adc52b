//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{config::Config, db::PgStore, judge::JudgeClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: PgStore,
    judge: JudgeClient,
    config: Config,
}

impl AppState {
    pub fn new(db: PgPool, judge: JudgeClient, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: PgStore::new(db),
                judge,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        self.inner.store.pool()
    }

    /// Persistence used by the execution pipeline
    pub fn store(&self) -> &PgStore {
        &self.inner.store
    }

    pub fn judge(&self) -> &JudgeClient {
        &self.inner.judge
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
