//! Submission repository

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewSubmission, NewTestCaseResult, Submission, TestCaseResult},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new submission
    pub async fn create<'e, E>(executor: E, submission: &NewSubmission) -> AppResult<Submission>
    where
        E: PgExecutor<'e>,
    {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                user_id, problem_id, source_code, language, stdin, stdout,
                stderr, compile_output, status, memory, time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(submission.user_id)
        .bind(submission.problem_id)
        .bind(&submission.source_code)
        .bind(&submission.language)
        .bind(&submission.stdin)
        .bind(&submission.stdout)
        .bind(&submission.stderr)
        .bind(&submission.compile_output)
        .bind(submission.status.as_str())
        .bind(&submission.memory)
        .bind(&submission.time)
        .fetch_one(executor)
        .await?;

        Ok(submission)
    }

    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(submission)
    }

    /// List a user's submissions, optionally for one problem, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &Uuid,
        problem_id: Option<&Uuid>,
    ) -> AppResult<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE user_id = $1
                AND ($2::uuid IS NULL OR problem_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }

    /// Count all submissions for a problem
    pub async fn count_by_problem(pool: &PgPool, problem_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM submissions WHERE problem_id = $1"#,
        )
        .bind(problem_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Insert all test case results of a submission in one statement
    pub async fn create_test_case_results<'e, E>(
        executor: E,
        submission_id: &Uuid,
        results: &[NewTestCaseResult],
    ) -> AppResult<Vec<TestCaseResult>>
    where
        E: PgExecutor<'e>,
    {
        if results.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            INSERT INTO test_case_results (
                submission_id, test_case, passed, stdout, expected, stderr,
                compile_output, status, judge_status, memory, time
            )
            "#,
        );

        builder.push_values(results, |mut row, result| {
            row.push_bind(*submission_id)
                .push_bind(result.test_case)
                .push_bind(result.passed)
                .push_bind(result.stdout.clone())
                .push_bind(result.expected.clone())
                .push_bind(result.stderr.clone())
                .push_bind(result.compile_output.clone())
                .push_bind(result.status.as_str())
                .push_bind(result.judge_status.clone())
                .push_bind(result.memory.clone())
                .push_bind(result.time.clone());
        });
        builder.push(" RETURNING *");

        let mut rows = builder
            .build_query_as::<TestCaseResult>()
            .fetch_all(executor)
            .await?;

        rows.sort_by_key(|row| row.test_case);
        Ok(rows)
    }

    /// Test case results of a submission in test case order
    pub async fn find_test_case_results(
        pool: &PgPool,
        submission_id: &Uuid,
    ) -> AppResult<Vec<TestCaseResult>> {
        let results = sqlx::query_as::<_, TestCaseResult>(
            r#"
            SELECT * FROM test_case_results
            WHERE submission_id = $1
            ORDER BY test_case
            "#,
        )
        .bind(submission_id)
        .fetch_all(pool)
        .await?;

        Ok(results)
    }
}
