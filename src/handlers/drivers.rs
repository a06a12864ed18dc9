// src/handlers/drivers.rs

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
    models::driver::{CreateDriverPayload, Driver, UpdateDriverPayload},
};

#[utoipa::path(
    get,
    path = "/api/admin/drivers",
    tag = "Drivers",
    responses((status = 200, description = "Motoristas", body = [Driver])),
    security(("api_jwt" = []))
)]
pub async fn list_drivers(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let drivers = app_state
        .driver_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(drivers)))
}

#[utoipa::path(
    post,
    path = "/api/admin/drivers",
    tag = "Drivers",
    request_body = CreateDriverPayload,
    responses(
        (status = 201, description = "Motorista criado", body = Driver),
        (status = 400, description = "Nome ou telefone vazio")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_driver(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateDriverPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let driver = app_state
        .driver_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(driver)))
}

#[utoipa::path(
    put,
    path = "/api/admin/drivers/{id}",
    tag = "Drivers",
    request_body = UpdateDriverPayload,
    params(("id" = String, Path, description = "ID do motorista")),
    responses((status = 200, description = "Motorista atualizado", body = Driver)),
    security(("api_jwt" = []))
)]
pub async fn update_driver(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDriverPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let driver = app_state
        .driver_service
        .update(&id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(driver)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/drivers/{id}",
    tag = "Drivers",
    params(("id" = String, Path, description = "ID do motorista")),
    responses((status = 204, description = "Motorista removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_driver(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .driver_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
