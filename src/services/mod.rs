//! Business logic services

pub mod execution_service;
pub mod problem_service;
pub mod solved_service;
pub mod submission_service;

pub use execution_service::{ExecutionRequest, ExecutionService};
pub use problem_service::ProblemService;
pub use solved_service::{MarkSolvedOutcome, SolvedService};
pub use submission_service::SubmissionService;
