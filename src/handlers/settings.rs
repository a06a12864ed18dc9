// src/handlers/settings.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::settings::{CounterGoal, VisitAnnouncement},
};

// GET /api/admin/configs/counter-goal
#[utoipa::path(
    get,
    path = "/api/admin/configs/counter-goal",
    tag = "Settings",
    responses((status = 200, description = "Meta mensal do balcão (0 se não definida)", body = CounterGoal)),
    security(("api_jwt" = []))
)]
pub async fn get_counter_goal(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let goal = app_state
        .settings_service
        .counter_goal()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(goal)))
}

// PUT /api/admin/configs/counter-goal
#[utoipa::path(
    put,
    path = "/api/admin/configs/counter-goal",
    tag = "Settings",
    request_body = CounterGoal,
    responses(
        (status = 200, description = "Meta gravada", body = CounterGoal),
        (status = 400, description = "Valor negativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_counter_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CounterGoal>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let goal = app_state
        .settings_service
        .set_counter_goal(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(goal)))
}

// GET /api/admin/text-templates/visit-announcement
#[utoipa::path(
    get,
    path = "/api/admin/text-templates/visit-announcement",
    tag = "Settings",
    responses((status = 200, description = "Texto do aviso de visita", body = VisitAnnouncement)),
    security(("api_jwt" = []))
)]
pub async fn get_visit_announcement(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let announcement = app_state
        .settings_service
        .visit_announcement()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(announcement)))
}

// PUT /api/admin/text-templates/visit-announcement
#[utoipa::path(
    put,
    path = "/api/admin/text-templates/visit-announcement",
    tag = "Settings",
    request_body = VisitAnnouncement,
    responses((status = 200, description = "Texto gravado", body = VisitAnnouncement)),
    security(("api_jwt" = []))
)]
pub async fn update_visit_announcement(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<VisitAnnouncement>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let announcement = app_state
        .settings_service
        .set_visit_announcement(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(announcement)))
}
