//! LeetShaastra judge backend
//!
//! Runs user code against test cases on a Judge0 deployment, records the
//! outcome per submission and test case, and tracks which problems each user
//! has solved.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Execution pipeline and solved-state propagation
//! - **Judge**: Judge0 batch client with bounded polling
//! - **Repositories**: Database access behind store traits
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
