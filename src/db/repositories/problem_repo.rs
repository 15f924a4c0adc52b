//! Problem repository

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewProblem, Problem},
};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Create a new problem
    pub async fn create(pool: &PgPool, problem: &NewProblem) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (
                title, description, difficulty, tags, examples, constraints,
                hints, editorial, testcases, code_snippets, reference_solutions, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&problem.title)
        .bind(&problem.description)
        .bind(problem.difficulty.as_str())
        .bind(&problem.tags)
        .bind(&problem.examples)
        .bind(&problem.constraints)
        .bind(&problem.hints)
        .bind(&problem.editorial)
        .bind(Json(&problem.testcases))
        .bind(&problem.code_snippets)
        .bind(Json(&problem.reference_solutions))
        .bind(problem.user_id)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// All problems, newest first
    pub async fn list_all(pool: &PgPool) -> AppResult<Vec<Problem>> {
        let problems =
            sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems ORDER BY created_at DESC"#)
                .fetch_all(pool)
                .await?;

        Ok(problems)
    }

    /// Replace every editable field of a problem; the author is kept
    pub async fn update(pool: &PgPool, id: &Uuid, problem: &NewProblem) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            UPDATE problems SET
                title = $2,
                description = $3,
                difficulty = $4,
                tags = $5,
                examples = $6,
                constraints = $7,
                hints = $8,
                editorial = $9,
                testcases = $10,
                code_snippets = $11,
                reference_solutions = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&problem.title)
        .bind(&problem.description)
        .bind(problem.difficulty.as_str())
        .bind(&problem.tags)
        .bind(&problem.examples)
        .bind(&problem.constraints)
        .bind(&problem.hints)
        .bind(&problem.editorial)
        .bind(Json(&problem.testcases))
        .bind(&problem.code_snippets)
        .bind(Json(&problem.reference_solutions))
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Delete a problem; its submissions and solved records cascade
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM problems WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// IDs of every problem carrying exactly this title
    pub async fn find_ids_by_title(pool: &PgPool, title: &str) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(r#"SELECT id FROM problems WHERE title = $1"#)
            .bind(title)
            .fetch_all(pool)
            .await?;

        Ok(ids)
    }

    /// Problems the user has solved, newest first
    pub async fn list_solved_by_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT p.* FROM problems p
            JOIN problems_solved ps ON ps.problem_id = p.id
            WHERE ps.user_id = $1
            ORDER BY ps.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }
}
