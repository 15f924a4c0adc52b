//! Execution response DTOs

use serde::Serialize;

use crate::models::SubmissionWithTestCases;

/// Execution response
#[derive(Debug, Serialize)]
pub struct ExecuteCodeResponse {
    pub success: bool,
    pub message: String,
    pub submission: SubmissionWithTestCases,
}
