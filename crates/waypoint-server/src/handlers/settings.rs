//! Drift settings handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};

use super::parse_json_body;
use crate::{get_user_id, AppError, AppState};
use waypoint_core::DriftSettings;

/// GET /api/settings/drift - Drift thresholds for the requesting user
///
/// Users without stored thresholds get the configured defaults.
pub async fn get_drift_settings(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<DriftSettings>, AppError> {
    let user_id = get_user_id(request.headers());
    let settings = state
        .db
        .drift_settings_for(&user_id, &state.config.engine.default_drift)?;
    Ok(Json(settings))
}

/// PUT /api/settings/drift - Replace the requesting user's drift thresholds
pub async fn update_drift_settings(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<DriftSettings>, AppError> {
    let user_id = get_user_id(request.headers());
    let settings: DriftSettings = parse_json_body(request.into_body()).await?;

    state
        .db
        .set_drift_settings(&user_id, &settings)
        .map_err(AppError::from_core)?;

    Ok(Json(settings))
}
