//! Execution handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{ExecutionRequest, ExecutionService},
    state::AppState,
};

use super::{request::ExecuteCodeRequest, response::ExecuteCodeResponse};

/// Execute code against test cases and record the submission
pub async fn execute_code(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<ExecuteCodeRequest>,
) -> AppResult<Json<ExecuteCodeResponse>> {
    payload.validate()?;

    let request = ExecutionRequest {
        user_id: auth_user.id,
        problem_id: payload.problem_id,
        source_code: payload.source_code,
        language_id: payload.language_id,
        stdin: payload.stdin,
        expected_outputs: payload.expected_outputs,
    };

    let submission = ExecutionService::execute_submission(
        state.judge(),
        state.store(),
        state.config().judge.max_batch_size,
        request,
    )
    .await?;

    Ok(Json(ExecuteCodeResponse {
        success: true,
        message: "Code executed successfully".to_string(),
        submission,
    }))
}
