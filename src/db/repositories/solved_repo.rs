//! Solved-state repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::ProblemSolved};

/// Repository for `problems_solved` rows
pub struct SolvedRepository;

impl SolvedRepository {
    /// Whether the user has a solved record for the problem
    pub async fn exists(pool: &PgPool, user_id: &Uuid, problem_id: &Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM problems_solved
                WHERE user_id = $1 AND problem_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Every solved record of a user
    pub async fn list_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<ProblemSolved>> {
        let records = sqlx::query_as::<_, ProblemSolved>(
            r#"SELECT * FROM problems_solved WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Insert-or-ignore a solved record for each problem; returns rows inserted
    pub async fn upsert_many(pool: &PgPool, user_id: &Uuid, problem_ids: &[Uuid]) -> AppResult<u64> {
        if problem_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO problems_solved (user_id, problem_id)
            SELECT $1, problem_id FROM UNNEST($2::uuid[]) AS t(problem_id)
            ON CONFLICT (user_id, problem_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(problem_ids)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
