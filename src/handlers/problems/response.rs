//! Problem response DTOs

use serde::Serialize;

use crate::{
    models::{Problem, ProblemListing},
    services::MarkSolvedOutcome,
};

/// Single problem response
#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub success: bool,
    pub message: String,
    pub problem: Problem,
}

/// Problem list response
#[derive(Debug, Serialize)]
pub struct ProblemsResponse {
    pub success: bool,
    pub message: String,
    pub problems: Vec<Problem>,
}

/// All problems with the caller's solved state
#[derive(Debug, Serialize)]
pub struct ProblemListingsResponse {
    pub success: bool,
    pub message: String,
    pub problems: Vec<ProblemListing>,
}

#[derive(Debug, Serialize)]
pub struct DeleteProblemResponse {
    pub success: bool,
    pub message: String,
}

/// Mark-solved response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSolvedResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub outcome: MarkSolvedOutcome,
}
