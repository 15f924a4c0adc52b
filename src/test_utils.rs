//! Test utilities: an in-memory store implementing the persistence traits

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::{ProblemStore, SolvedStore, SubmissionStore},
    error::{AppError, AppResult},
    models::{
        NewSubmission, NewTestCaseResult, Problem, Submission, SubmissionWithTestCases,
        TestCaseResult,
    },
};

#[derive(Default)]
struct Inner {
    problems: Vec<Problem>,
    submissions: Vec<SubmissionWithTestCases>,
    solved: Vec<(Uuid, Uuid)>,
    fail_saves: bool,
    fail_next_insert: bool,
}

/// In-memory stand-in for Postgres
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a problem with the given title and return its id
    pub fn add_problem(&self, title: &str) -> Uuid {
        let now = Utc::now();
        let problem = Problem {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{} description", title),
            difficulty: "EASY".to_string(),
            tags: Vec::new(),
            examples: serde_json::json!({}),
            constraints: String::new(),
            hints: None,
            editorial: None,
            testcases: Json(Vec::new()),
            code_snippets: serde_json::json!({}),
            reference_solutions: Json(BTreeMap::new()),
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        let id = problem.id;
        self.inner.lock().unwrap().problems.push(problem);
        id
    }

    /// Make every following `save_submission` fail like a broken database
    pub fn fail_saves(&self) {
        self.inner.lock().unwrap().fail_saves = true;
    }

    /// Make the next `insert_solved` fail without writing anything
    pub fn fail_next_insert(&self) {
        self.inner.lock().unwrap().fail_next_insert = true;
    }

    pub fn submissions(&self) -> Vec<SubmissionWithTestCases> {
        self.inner.lock().unwrap().submissions.clone()
    }

    pub fn solved_records(&self) -> Vec<(Uuid, Uuid)> {
        self.inner.lock().unwrap().solved.clone()
    }

    pub fn solved_count(&self, user_id: Uuid, problem_id: Uuid) -> usize {
        self.inner
            .lock()
            .unwrap()
            .solved
            .iter()
            .filter(|record| **record == (user_id, problem_id))
            .count()
    }
}

#[async_trait]
impl ProblemStore for MemoryStore {
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.problems.iter().find(|p| p.id == id).cloned())
    }

    async fn find_problem_ids_by_title(&self, title: &str) -> AppResult<Vec<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .problems
            .iter()
            .filter(|p| p.title == title)
            .map(|p| p.id)
            .collect())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn save_submission(
        &self,
        submission: NewSubmission,
        results: Vec<NewTestCaseResult>,
    ) -> AppResult<SubmissionWithTestCases> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_saves {
            return Err(AppError::Database("connection reset".to_string()));
        }

        let now = Utc::now();
        let submission = Submission {
            id: Uuid::new_v4(),
            user_id: submission.user_id,
            problem_id: submission.problem_id,
            source_code: submission.source_code,
            language: submission.language,
            stdin: Some(submission.stdin),
            stdout: Some(submission.stdout),
            stderr: submission.stderr,
            compile_output: submission.compile_output,
            status: submission.status.as_str().to_string(),
            memory: submission.memory,
            time: submission.time,
            created_at: now,
            updated_at: now,
        };

        let test_cases = results
            .into_iter()
            .map(|r| TestCaseResult {
                id: Uuid::new_v4(),
                submission_id: submission.id,
                test_case: r.test_case,
                passed: r.passed,
                stdout: Some(r.stdout),
                expected: r.expected,
                stderr: r.stderr,
                compile_output: r.compile_output,
                status: r.status.as_str().to_string(),
                judge_status: r.judge_status,
                memory: r.memory,
                time: r.time,
                created_at: now,
            })
            .collect();

        let saved = SubmissionWithTestCases {
            submission,
            test_cases,
        };
        inner.submissions.push(saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl SolvedStore for MemoryStore {
    async fn is_solved(&self, user_id: Uuid, problem_id: Uuid) -> AppResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.solved.contains(&(user_id, problem_id)))
    }

    async fn insert_solved(&self, user_id: Uuid, problem_ids: &[Uuid]) -> AppResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        if std::mem::take(&mut inner.fail_next_insert) {
            return Err(AppError::Database("deadlock detected".to_string()));
        }

        let mut inserted = 0;
        for problem_id in problem_ids {
            let record = (user_id, *problem_id);
            if !inner.solved.contains(&record) {
                inner.solved.push(record);
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
