//! Projection, insight and what-if handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse_json_body;
use crate::{get_user_id, AppError, AppState};
use waypoint_core::insights::{Insight, Projection};
use waypoint_core::{calculate_what_if, InsightEngine, InsightsSummary, WhatIfResult};

/// Query parameters carrying an optional evaluation date
#[derive(Debug, Deserialize)]
pub struct EvaluationQuery {
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// GET /api/insights - Summary across all active goals
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EvaluationQuery>,
    request: Request,
) -> Result<Json<InsightsSummary>, AppError> {
    let user_id = get_user_id(request.headers());
    let ctx = state.analysis_context(params.date);

    let summary = InsightEngine::new().summarize_from_store(&state.db, &user_id, &ctx)?;

    Ok(Json(summary))
}

/// Projection with the insights it triggered
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub projection: Projection,
    pub insights: Vec<Insight>,
}

/// GET /api/goals/:id/projection - Projection for one goal
pub async fn get_projection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<EvaluationQuery>,
    request: Request,
) -> Result<Json<ProjectionResponse>, AppError> {
    let user_id = get_user_id(request.headers());
    let ctx = state.analysis_context(params.date);
    let goal = state.db.require_goal(id).map_err(AppError::from_core)?;

    let analysis = InsightEngine::new().analyze_from_store(&state.db, &goal, &user_id, &ctx)?;

    Ok(Json(ProjectionResponse {
        projection: analysis.projection,
        insights: analysis.insights,
    }))
}

/// Request body for a what-if simulation
#[derive(Debug, Deserialize)]
pub struct WhatIfRequest {
    /// Extra amount per month
    pub monthly: f64,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct WhatIfResponse {
    pub current_completion_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub result: WhatIfResult,
}

/// POST /api/goals/:id/what-if - Simulate an extra monthly contribution
pub async fn what_if(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<WhatIfResponse>, AppError> {
    let user_id = get_user_id(request.headers());
    let req: WhatIfRequest = parse_json_body(request.into_body()).await?;
    if !req.monthly.is_finite() {
        return Err(AppError::bad_request("monthly must be a number"));
    }

    let ctx = state.analysis_context(req.date);
    let goal = state.db.require_goal(id).map_err(AppError::from_core)?;
    let analysis = InsightEngine::new().analyze_from_store(&state.db, &goal, &user_id, &ctx)?;

    let result = calculate_what_if(&analysis.projection, req.monthly, ctx.today);

    Ok(Json(WhatIfResponse {
        current_completion_date: analysis.projection.estimated_completion_date,
        result,
    }))
}
