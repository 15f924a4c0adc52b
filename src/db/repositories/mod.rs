//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod problem_repo;
pub mod solved_repo;
pub mod submission_repo;

pub use problem_repo::ProblemRepository;
pub use solved_repo::SolvedRepository;
pub use submission_repo::SubmissionRepository;
