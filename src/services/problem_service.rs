//! Problem service

use futures::future::try_join_all;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::repositories::{ProblemRepository, SolvedRepository},
    error::{AppError, AppResult},
    judge::{language_id_for, supported_languages, BatchItem, JudgeClient},
    models::{NewProblem, Problem, ProblemListing, ProblemTestCase},
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Create a problem after every reference solution passed every test case
    #[instrument(skip_all, fields(title = %problem.title))]
    pub async fn create_problem(
        pool: &PgPool,
        judge: &JudgeClient,
        max_batch_size: usize,
        problem: NewProblem,
    ) -> AppResult<Problem> {
        Self::validate_problem(judge, max_batch_size, &problem).await?;

        let created = ProblemRepository::create(pool, &problem).await?;
        info!(problem_id = %created.id, "Problem created");

        Ok(created)
    }

    /// Replace a problem's content; only its author may do so
    ///
    /// The new reference solutions are validated like on creation.
    #[instrument(skip_all, fields(problem_id = %id))]
    pub async fn update_problem(
        pool: &PgPool,
        judge: &JudgeClient,
        max_batch_size: usize,
        id: &Uuid,
        requester_id: &Uuid,
        problem: NewProblem,
    ) -> AppResult<Problem> {
        let existing = Self::get_problem(pool, id).await?;
        Self::check_author(&existing, requester_id, "update")?;

        Self::validate_problem(judge, max_batch_size, &problem).await?;

        let updated = ProblemRepository::update(pool, id, &problem).await?;
        info!("Problem updated");

        Ok(updated)
    }

    /// Delete a problem; only its author may do so
    pub async fn delete_problem(pool: &PgPool, id: &Uuid, requester_id: &Uuid) -> AppResult<()> {
        let existing = Self::get_problem(pool, id).await?;
        Self::check_author(&existing, requester_id, "delete")?;

        if !ProblemRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        info!(problem_id = %id, "Problem deleted");
        Ok(())
    }

    /// Every problem, each with the user's solved records for it
    pub async fn list_problems(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<ProblemListing>> {
        let problems = ProblemRepository::list_all(pool).await?;
        let solved = SolvedRepository::list_for_user(pool, user_id).await?;

        Ok(ProblemListing::attach(problems, solved))
    }

    fn check_author(problem: &Problem, requester_id: &Uuid, action: &str) -> AppResult<()> {
        if problem.user_id != *requester_id {
            return Err(AppError::Forbidden(format!(
                "You are not authorized to {} this problem",
                action
            )));
        }
        Ok(())
    }

    /// Test case limits plus reference-solution runs
    pub async fn validate_problem(
        judge: &JudgeClient,
        max_batch_size: usize,
        problem: &NewProblem,
    ) -> AppResult<()> {
        if problem.testcases.is_empty() {
            return Err(AppError::Validation(
                "At least one test case is required".to_string(),
            ));
        }

        if problem.testcases.len() > max_batch_size {
            return Err(AppError::Validation(format!(
                "At most {} test cases are allowed",
                max_batch_size
            )));
        }

        Self::validate_reference_solutions(judge, problem).await
    }

    /// Run each reference solution against the test cases, one batch per language
    ///
    /// The batches run concurrently; the first failing language fails the whole call.
    pub async fn validate_reference_solutions(
        judge: &JudgeClient,
        problem: &NewProblem,
    ) -> AppResult<()> {
        if problem.reference_solutions.is_empty() {
            return Err(AppError::Validation(
                "At least one reference solution is required".to_string(),
            ));
        }

        let checks = problem
            .reference_solutions
            .iter()
            .map(|(language, source)| {
                Self::check_reference_solution(judge, language, source, &problem.testcases)
            });

        try_join_all(checks).await?;
        Ok(())
    }

    async fn check_reference_solution(
        judge: &JudgeClient,
        language: &str,
        source: &str,
        testcases: &[ProblemTestCase],
    ) -> AppResult<()> {
        let language_id = language_id_for(language).ok_or_else(|| {
            AppError::Validation(format!(
                "Language {} is not supported, expected one of {}",
                language,
                supported_languages().collect::<Vec<_>>().join(", ")
            ))
        })?;

        let items: Vec<BatchItem> = testcases
            .iter()
            .map(|tc| BatchItem::checked(source, language_id, &tc.input, &tc.output))
            .collect();

        let results = judge.run_batch(&items).await?;

        for (index, result) in results.iter().enumerate() {
            if !result.status.is_accepted() {
                warn!(
                    language,
                    test_case = index + 1,
                    status = %result.status.description,
                    "Reference solution rejected"
                );
                return Err(AppError::Validation(format!(
                    "Testcase {} failed for language {}",
                    index + 1,
                    language
                )));
            }
        }

        Ok(())
    }

    /// Get problem by ID
    pub async fn get_problem(pool: &PgPool, id: &Uuid) -> AppResult<Problem> {
        ProblemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
    }

    /// Problems solved by the user, newest first
    pub async fn list_solved(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Problem>> {
        ProblemRepository::list_solved_by_user(pool, user_id).await
    }
}
