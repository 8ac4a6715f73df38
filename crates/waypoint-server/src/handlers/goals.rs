//! Goal and progress handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::parse_json_body;
use crate::{AppError, AppState, SuccessResponse, MAX_HISTORY_LIMIT};
use waypoint_core::{Goal, GoalStatus, NewGoal, ProgressSnapshot};

/// Query parameters for listing goals
#[derive(Debug, Deserialize)]
pub struct ListGoalsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/goals - List goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListGoalsQuery>,
) -> Result<Json<Vec<Goal>>, AppError> {
    let goals = state.db.list_goals(params.include_inactive)?;
    Ok(Json(goals))
}

/// POST /api/goals - Create a goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Goal>, AppError> {
    let new_goal: NewGoal = parse_json_body(request.into_body()).await?;

    let id = state
        .db
        .create_goal(&new_goal)
        .map_err(AppError::from_core)?;

    let goal = state
        .db
        .get_goal(id)?
        .ok_or_else(|| AppError::internal("Goal not found after creation"))?;

    Ok(Json(goal))
}

/// GET /api/goals/:id - Get a single goal
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Goal>, AppError> {
    let goal = state
        .db
        .get_goal(id)?
        .ok_or_else(|| AppError::not_found(&format!("Goal {} not found", id)))?;

    Ok(Json(goal))
}

/// Request body for changing a goal's status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// POST /api/goals/:id/status - Change a goal's status
pub async fn update_goal_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Goal>, AppError> {
    let req: UpdateStatusRequest = parse_json_body(request.into_body()).await?;
    let status: GoalStatus = req
        .status
        .parse()
        .map_err(|_| AppError::bad_request(&format!("Unknown status: {}", req.status)))?;

    state
        .db
        .update_goal_status(id, status)
        .map_err(AppError::from_core)?;
    let goal = state.db.require_goal(id).map_err(AppError::from_core)?;

    Ok(Json(goal))
}

/// POST /api/goals/:id/deactivate - Deactivate a goal
pub async fn deactivate_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.deactivate_goal(id).map_err(AppError::from_core)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Request body for recording progress
#[derive(Debug, Deserialize)]
pub struct RecordProgressRequest {
    pub value: f64,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// POST /api/goals/:id/progress - Record a goal's value
pub async fn record_progress(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<ProgressSnapshot>, AppError> {
    let req: RecordProgressRequest = parse_json_body(request.into_body()).await?;
    let date = req
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let snapshot = state
        .db
        .record_progress(id, req.value, date)
        .map_err(AppError::from_core)?;

    Ok(Json(snapshot))
}

/// Query parameters for snapshot history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// GET /api/goals/:id/history - Snapshot history, newest first
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<ProgressSnapshot>>, AppError> {
    state.db.require_goal(id).map_err(AppError::from_core)?;

    let limit = params
        .limit
        .unwrap_or(state.config.engine.history_limit)
        .min(MAX_HISTORY_LIMIT);
    let history = state.db.list_progress_history(id, limit)?;

    Ok(Json(history))
}
