//! Code execution pipeline
//!
//! Runs one user's code against a set of test cases on the judge, scores the
//! results, stores the submission with its per-test-case rows, and marks the
//! problem solved when every test case passed.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    db::{ProblemStore, SolvedStore, SubmissionStore},
    error::{AppError, AppResult},
    judge::{language_name_for, BatchItem, ExecutionResult, JudgeClient, JudgeError},
    models::{NewSubmission, NewTestCaseResult, SubmissionStatus, SubmissionWithTestCases, TestCase},
};

use super::SolvedService;

/// A request to run code against caller-supplied test cases
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub source_code: String,
    pub language_id: i32,
    pub stdin: Vec<String>,
    pub expected_outputs: Vec<String>,
}

impl ExecutionRequest {
    /// Pair inputs with expected outputs, rejecting malformed test case arrays
    pub fn test_cases(&self, max_batch_size: usize) -> AppResult<Vec<TestCase>> {
        if self.stdin.is_empty() || self.stdin.len() != self.expected_outputs.len() {
            return Err(AppError::Validation(
                "Invalid or missing test cases".to_string(),
            ));
        }

        if self.stdin.len() > max_batch_size {
            return Err(AppError::Validation(format!(
                "At most {} test cases can be run at once",
                max_batch_size
            )));
        }

        if self.source_code.trim().is_empty() {
            return Err(AppError::Validation("Source code is required".to_string()));
        }

        Ok(self
            .stdin
            .iter()
            .zip(&self.expected_outputs)
            .map(|(input, expected)| TestCase::new(input.clone(), expected.clone()))
            .collect())
    }
}

/// Execution service
pub struct ExecutionService;

impl ExecutionService {
    /// Run, score and persist one submission
    ///
    /// Nothing is written when validation or the judge fails. The submission
    /// and its test case results are stored together; solved-state is only
    /// touched after that write succeeded.
    #[instrument(
        skip_all,
        fields(user_id = %request.user_id, problem_id = %request.problem_id, language_id = request.language_id)
    )]
    pub async fn execute_submission<S>(
        judge: &JudgeClient,
        store: &S,
        max_batch_size: usize,
        request: ExecutionRequest,
    ) -> AppResult<SubmissionWithTestCases>
    where
        S: ProblemStore + SubmissionStore + SolvedStore + ?Sized,
    {
        let test_cases = request.test_cases(max_batch_size)?;

        if store.find_problem(request.problem_id).await?.is_none() {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        let items: Vec<BatchItem> = test_cases
            .iter()
            .map(|tc| BatchItem::run(&request.source_code, request.language_id, &tc.input))
            .collect();

        let results = judge.run_batch(&items).await?;
        if results.len() != test_cases.len() {
            return Err(JudgeError::Unavailable(format!(
                "judge returned {} results for {} test cases",
                results.len(),
                test_cases.len()
            ))
            .into());
        }

        let rows = score_results(&test_cases, &results);
        let submission = build_submission(&request, &test_cases, &rows);
        let status = submission.status;

        let saved = store.save_submission(submission, rows).await?;

        info!(
            submission_id = %saved.submission.id,
            status = %status,
            test_cases = saved.test_cases.len(),
            "Submission recorded"
        );

        if status.is_accepted() {
            SolvedService::mark_solved(store, request.user_id, request.problem_id).await?;
        }

        Ok(saved)
    }
}

/// Compare each result with its test case, by position
pub fn score_results(test_cases: &[TestCase], results: &[ExecutionResult]) -> Vec<NewTestCaseResult> {
    test_cases
        .iter()
        .zip(results)
        .enumerate()
        .map(|(index, (tc, result))| {
            let stdout = result.stdout.as_deref().unwrap_or_default().trim().to_string();
            let passed = tc.matches(&stdout);

            NewTestCaseResult {
                test_case: index as i32 + 1,
                passed,
                stdout,
                expected: tc.expected_output.trim().to_string(),
                stderr: result.stderr.clone(),
                compile_output: result.compile_output.clone(),
                status: if passed {
                    SubmissionStatus::Accepted
                } else {
                    SubmissionStatus::WrongAnswer
                },
                judge_status: result.status.description.clone(),
                memory: result.memory_display(),
                time: result.time_display(),
            }
        })
        .collect()
}

/// Aggregate the scored rows into the submission record
pub fn build_submission(
    request: &ExecutionRequest,
    test_cases: &[TestCase],
    rows: &[NewTestCaseResult],
) -> NewSubmission {
    let stdin = test_cases
        .iter()
        .map(|tc| tc.input.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    NewSubmission {
        user_id: request.user_id,
        problem_id: request.problem_id,
        source_code: request.source_code.clone(),
        language: language_name_for(request.language_id).to_string(),
        stdin,
        stdout: json_array(rows.iter().map(|r| Some(r.stdout.as_str()))),
        stderr: json_array_if_any(rows.iter().map(|r| r.stderr.as_deref())),
        compile_output: json_array_if_any(rows.iter().map(|r| r.compile_output.as_deref())),
        status: SubmissionStatus::from_passes(rows.iter().map(|r| r.passed)),
        memory: json_array_if_any(rows.iter().map(|r| r.memory.as_deref())),
        time: json_array_if_any(rows.iter().map(|r| r.time.as_deref())),
    }
}

fn json_array<'a, I>(values: I) -> String
where
    I: Iterator<Item = Option<&'a str>>,
{
    serde_json::Value::Array(
        values
            .map(|v| v.map_or(serde_json::Value::Null, |s| serde_json::Value::String(s.to_string())))
            .collect(),
    )
    .to_string()
}

// Null unless at least one test case has a non-empty value
fn json_array_if_any<'a, I>(values: I) -> Option<String>
where
    I: Iterator<Item = Option<&'a str>> + Clone,
{
    let any = values.clone().any(|v| v.is_some_and(|s| !s.is_empty()));
    any.then(|| json_array(values))
}
