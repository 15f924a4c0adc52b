//! Submission response DTOs

use serde::Serialize;

use crate::models::{Submission, SubmissionWithTestCases};

/// Submission list response
#[derive(Debug, Serialize)]
pub struct SubmissionsResponse {
    pub success: bool,
    pub message: String,
    pub submissions: Vec<Submission>,
}

/// Submission count response
#[derive(Debug, Serialize)]
pub struct SubmissionCountResponse {
    pub success: bool,
    pub message: String,
    pub count: i64,
}

/// Single submission with test case results
#[derive(Debug, Serialize)]
pub struct SubmissionDetailResponse {
    pub success: bool,
    pub submission: SubmissionWithTestCases,
}
