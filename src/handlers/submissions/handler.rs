//! Submission handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::SubmissionService,
    state::AppState,
};

use super::response::{SubmissionCountResponse, SubmissionDetailResponse, SubmissionsResponse};

/// List the caller's submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<SubmissionsResponse>> {
    let submissions = SubmissionService::list_for_user(state.db(), &auth_user.id).await?;

    Ok(Json(SubmissionsResponse {
        success: true,
        message: "Submissions fetched successfully".to_string(),
        submissions,
    }))
}

/// List the caller's submissions for one problem
pub async fn list_problem_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
) -> AppResult<Json<SubmissionsResponse>> {
    let submissions =
        SubmissionService::list_for_problem(state.db(), &auth_user.id, &problem_id).await?;

    Ok(Json(SubmissionsResponse {
        success: true,
        message: "Submissions fetched successfully".to_string(),
        submissions,
    }))
}

/// Count every user's submissions for a problem
pub async fn count_submissions(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
) -> AppResult<Json<SubmissionCountResponse>> {
    let count = SubmissionService::count_for_problem(state.db(), &problem_id).await?;

    Ok(Json(SubmissionCountResponse {
        success: true,
        message: "Submission count fetched successfully".to_string(),
        count,
    }))
}

/// Get one submission with its test case results
pub async fn get_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionDetailResponse>> {
    let submission = SubmissionService::get_details(state.db(), &id, &auth_user).await?;

    Ok(Json(SubmissionDetailResponse {
        success: true,
        submission,
    }))
}
