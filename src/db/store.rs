//! Persistence seams for the execution pipeline
//!
//! Services depend on these traits rather than on `PgPool` directly so the
//! pipeline can run against an in-memory store in tests.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewSubmission, NewTestCaseResult, Problem, SubmissionWithTestCases},
};

use super::repositories::{ProblemRepository, SolvedRepository, SubmissionRepository};

/// Problem lookups
#[async_trait]
pub trait ProblemStore: Send + Sync {
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>>;

    /// Every problem id with exactly this title, including duplicates
    async fn find_problem_ids_by_title(&self, title: &str) -> AppResult<Vec<Uuid>>;
}

/// Submission writes
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert the submission and all its test case results atomically
    async fn save_submission(
        &self,
        submission: NewSubmission,
        results: Vec<NewTestCaseResult>,
    ) -> AppResult<SubmissionWithTestCases>;
}

/// Solved-state records
#[async_trait]
pub trait SolvedStore: Send + Sync {
    async fn is_solved(&self, user_id: Uuid, problem_id: Uuid) -> AppResult<bool>;

    /// Insert-or-ignore one record per problem in a single statement; returns how many were new
    async fn insert_solved(&self, user_id: Uuid, problem_ids: &[Uuid]) -> AppResult<u64>;
}

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProblemStore for PgStore {
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>> {
        ProblemRepository::find_by_id(&self.pool, &id).await
    }

    async fn find_problem_ids_by_title(&self, title: &str) -> AppResult<Vec<Uuid>> {
        ProblemRepository::find_ids_by_title(&self.pool, title).await
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn save_submission(
        &self,
        submission: NewSubmission,
        results: Vec<NewTestCaseResult>,
    ) -> AppResult<SubmissionWithTestCases> {
        // Dropping the transaction without commit rolls both inserts back
        let mut tx = self.pool.begin().await?;

        let submission = SubmissionRepository::create(&mut *tx, &submission).await?;
        let test_cases =
            SubmissionRepository::create_test_case_results(&mut *tx, &submission.id, &results)
                .await?;

        tx.commit().await?;

        Ok(SubmissionWithTestCases {
            submission,
            test_cases,
        })
    }
}

#[async_trait]
impl SolvedStore for PgStore {
    async fn is_solved(&self, user_id: Uuid, problem_id: Uuid) -> AppResult<bool> {
        SolvedRepository::exists(&self.pool, &user_id, &problem_id).await
    }

    async fn insert_solved(&self, user_id: Uuid, problem_ids: &[Uuid]) -> AppResult<u64> {
        SolvedRepository::upsert_many(&self.pool, &user_id, problem_ids).await
    }
}
