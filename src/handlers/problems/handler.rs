//! Problem handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{ProblemService, SolvedService},
    state::AppState,
};

use super::{
    request::CreateProblemRequest,
    response::{
        DeleteProblemResponse, MarkSolvedResponse, ProblemListingsResponse, ProblemResponse,
        ProblemsResponse,
    },
};

/// Create a problem; every reference solution must pass every test case
pub async fn create_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<ProblemResponse>)> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can create problems".to_string(),
        ));
    }

    payload.validate()?;

    let problem = ProblemService::create_problem(
        state.db(),
        state.judge(),
        state.config().judge.max_batch_size,
        payload.into_new_problem(auth_user.id),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProblemResponse {
            success: true,
            message: "Problem created successfully".to_string(),
            problem,
        }),
    ))
}

/// Replace a problem's content; admin and author only
pub async fn update_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<Json<ProblemResponse>> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can update problems".to_string(),
        ));
    }

    payload.validate()?;

    let problem = ProblemService::update_problem(
        state.db(),
        state.judge(),
        state.config().judge.max_batch_size,
        &id,
        &auth_user.id,
        payload.into_new_problem(auth_user.id),
    )
    .await?;

    Ok(Json(ProblemResponse {
        success: true,
        message: "Problem updated successfully".to_string(),
        problem,
    }))
}

/// Delete a problem; admin and author only
pub async fn delete_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteProblemResponse>> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can delete problems".to_string(),
        ));
    }

    ProblemService::delete_problem(state.db(), &id, &auth_user.id).await?;

    Ok(Json(DeleteProblemResponse {
        success: true,
        message: "Problem deleted successfully".to_string(),
    }))
}

/// Every problem, with the caller's solved records attached
pub async fn list_problems(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProblemListingsResponse>> {
    let problems = ProblemService::list_problems(state.db(), &auth_user.id).await?;

    Ok(Json(ProblemListingsResponse {
        success: true,
        message: "Problems fetched successfully".to_string(),
        problems,
    }))
}

/// Get a specific problem
pub async fn get_problem(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProblemResponse>> {
    let problem = ProblemService::get_problem(state.db(), &id).await?;

    Ok(Json(ProblemResponse {
        success: true,
        message: "Problem fetched successfully".to_string(),
        problem,
    }))
}

/// Problems the caller has solved
pub async fn list_solved_problems(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProblemsResponse>> {
    let problems = ProblemService::list_solved(state.db(), &auth_user.id).await?;

    Ok(Json(ProblemsResponse {
        success: true,
        message: "Solved problems fetched successfully".to_string(),
        problems,
    }))
}

/// Mark a problem and its same-titled copies as solved by the caller
pub async fn mark_solved(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MarkSolvedResponse>> {
    let outcome = SolvedService::mark_solved(state.store(), auth_user.id, id).await?;

    let message = if outcome.already_solved {
        "Problem already marked as solved"
    } else {
        "Problem marked as solved"
    };

    Ok(Json(MarkSolvedResponse {
        success: true,
        message: message.to_string(),
        outcome,
    }))
}
