//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default timeout for a single HTTP call to the judge, in seconds
pub const DEFAULT_JUDGE_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Default ceiling on the total time spent polling one batch, in seconds
pub const DEFAULT_JUDGE_POLL_TIMEOUT_SECONDS: u64 = 180;

/// Default maximum number of test cases in one batch (Judge0's own default)
pub const DEFAULT_JUDGE_MAX_BATCH_SIZE: usize = 20;

/// Poll interval used while the batch is young
pub const POLL_INITIAL_INTERVAL_MS: u64 = 1_000;

/// Elapsed wait after which the poll interval starts doubling
pub const POLL_FAST_PHASE_MS: u64 = 4_000;

/// Upper bound for the poll interval
pub const POLL_MAX_INTERVAL_MS: u64 = 8_000;

/// Judge0 status identifiers
pub mod judge_status {
    pub const IN_QUEUE: i32 = 1;
    pub const PROCESSING: i32 = 2;
    pub const ACCEPTED: i32 = 3;
}

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language names as stored on submissions
pub mod languages {
    pub const PYTHON: &str = "PYTHON";
    pub const JAVA: &str = "JAVA";
    pub const JAVASCRIPT: &str = "JAVASCRIPT";
    pub const TYPESCRIPT: &str = "TYPESCRIPT";

    /// Name stored for judge language ids outside the table
    pub const UNKNOWN: &str = "UNKNOWN";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "ADMIN";
    pub const USER: &str = "USER";
}

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission and test case statuses
pub mod statuses {
    pub const ACCEPTED: &str = "ACCEPTED";
    pub const WRONG_ANSWER: &str = "WRONG_ANSWER";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem description length
pub const MAX_PROBLEM_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum request body size in bytes (4 MB)
pub const MAX_REQUEST_BODY_BYTES: usize = 4 * 1024 * 1024;
