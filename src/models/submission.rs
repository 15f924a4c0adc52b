//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::statuses;

/// Submission database model
///
/// Per-test-case outputs are stored as JSON array strings, one entry per test
/// case in order. Optional columns are null when no test case produced a value.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub source_code: String,
    pub language: String,
    pub stdin: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: String,
    pub memory: Option<String>,
    pub time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate and per-test-case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Accepted,
    WrongAnswer,
}

impl SubmissionStatus {
    /// ACCEPTED iff every flag is set
    pub fn from_passes<I>(passes: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        if passes.into_iter().all(|passed| passed) {
            Self::Accepted
        } else {
            Self::WrongAnswer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => statuses::ACCEPTED,
            Self::WrongAnswer => statuses::WRONG_ANSWER,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Test case result for a submission
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub id: Uuid,
    pub submission_id: Uuid,
    /// 1-based position in the submitted batch
    pub test_case: i32,
    pub passed: bool,
    pub stdout: Option<String>,
    pub expected: String,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: String,
    /// Status description reported by the judge, e.g. "Runtime Error (NZEC)"
    pub judge_status: String,
    pub memory: Option<String>,
    pub time: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Submission row to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub source_code: String,
    pub language: String,
    pub stdin: String,
    pub stdout: String,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: SubmissionStatus,
    pub memory: Option<String>,
    pub time: Option<String>,
}

/// Test case result row to insert; the submission id is assigned on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewTestCaseResult {
    pub test_case: i32,
    pub passed: bool,
    pub stdout: String,
    pub expected: String,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: SubmissionStatus,
    pub judge_status: String,
    pub memory: Option<String>,
    pub time: Option<String>,
}

/// A submission with its test case results, ordered by test case
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionWithTestCases {
    #[serde(flatten)]
    pub submission: Submission,
    pub test_cases: Vec<TestCaseResult>,
}
