//! Submission service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::SubmissionRepository,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{Submission, SubmissionWithTestCases},
};

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// All of the user's submissions, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Submission>> {
        SubmissionRepository::list_by_user(pool, user_id, None).await
    }

    /// The user's submissions for one problem, newest first
    pub async fn list_for_problem(
        pool: &PgPool,
        user_id: &Uuid,
        problem_id: &Uuid,
    ) -> AppResult<Vec<Submission>> {
        SubmissionRepository::list_by_user(pool, user_id, Some(problem_id)).await
    }

    /// Number of submissions for a problem across all users
    pub async fn count_for_problem(pool: &PgPool, problem_id: &Uuid) -> AppResult<i64> {
        SubmissionRepository::count_by_problem(pool, problem_id).await
    }

    /// One submission with its test case results
    pub async fn get_details(
        pool: &PgPool,
        id: &Uuid,
        requester: &AuthenticatedUser,
    ) -> AppResult<SubmissionWithTestCases> {
        let submission = SubmissionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        Self::check_access(&submission, requester)?;

        let test_cases = SubmissionRepository::find_test_case_results(pool, id).await?;

        Ok(SubmissionWithTestCases {
            submission,
            test_cases,
        })
    }

    fn check_access(submission: &Submission, requester: &AuthenticatedUser) -> AppResult<()> {
        if submission.user_id != requester.id && requester.role != roles::ADMIN {
            return Err(AppError::Forbidden(
                "Cannot view other users' submissions".to_string(),
            ));
        }
        Ok(())
    }
}
