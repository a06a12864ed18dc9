// src/handlers/technicians.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::technician::{
        CreateTechnicianPayload, DistributeGoalPayload, SetGoalPayload, Technician,
        UpdateTechnicianPayload,
    },
};

// GET /api/admin/technicians (também /api/counter/technicians)
#[utoipa::path(
    get,
    path = "/api/admin/technicians",
    tag = "Technicians",
    responses(
        (status = 200, description = "Técnicos ordenados por nome", body = [Technician]),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_technicians(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let technicians = app_state
        .technician_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(technicians)))
}

// POST /api/admin/technicians
#[utoipa::path(
    post,
    path = "/api/admin/technicians",
    tag = "Technicians",
    request_body = CreateTechnicianPayload,
    responses(
        (status = 201, description = "Técnico criado", body = Technician),
        (status = 400, description = "Nome vazio ou meta negativa")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateTechnicianPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technician = app_state
        .technician_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(technician)))
}

// PUT /api/admin/technicians/{id}
#[utoipa::path(
    put,
    path = "/api/admin/technicians/{id}",
    tag = "Technicians",
    request_body = UpdateTechnicianPayload,
    params(("id" = String, Path, description = "ID do técnico")),
    responses(
        (status = 200, description = "Técnico atualizado", body = Technician),
        (status = 404, description = "Técnico não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTechnicianPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technician = app_state
        .technician_service
        .update(&id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(technician)))
}

// PUT /api/admin/technicians/{id}/goal
#[utoipa::path(
    put,
    path = "/api/admin/technicians/{id}/goal",
    tag = "Technicians",
    request_body = SetGoalPayload,
    params(("id" = String, Path, description = "ID do técnico")),
    responses((status = 200, description = "Meta individual definida", body = Technician)),
    security(("api_jwt" = []))
)]
pub async fn set_technician_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<SetGoalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technician = app_state
        .technician_service
        .set_goal(&id, payload.goal)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(technician)))
}

// POST /api/admin/technicians/goal-distribution
#[utoipa::path(
    post,
    path = "/api/admin/technicians/goal-distribution",
    tag = "Technicians",
    request_body = DistributeGoalPayload,
    responses(
        (status = 200, description = "Meta dividida igualmente; lista atualizada", body = [Technician]),
        (status = 400, description = "Meta global não positiva"),
        (status = 422, description = "Nenhum técnico cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn distribute_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<DistributeGoalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let technicians = app_state
        .technician_service
        .distribute_goal(payload.global_goal)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(technicians)))
}

// DELETE /api/admin/technicians/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/technicians/{id}",
    tag = "Technicians",
    params(("id" = String, Path, description = "ID do técnico")),
    responses(
        (status = 204, description = "Técnico removido"),
        (status = 404, description = "Técnico não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_technician(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .technician_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
