// src/handlers/presets.rs

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
    models::preset::{
        CodeCatalog, CodeCatalogs, CodeCategory, CreatePresetPayload, Preset, UpdatePresetPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/admin/presets",
    tag = "Presets",
    responses((status = 200, description = "Presets de atendimento", body = [Preset])),
    security(("api_jwt" = []))
)]
pub async fn list_presets(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let presets = app_state
        .preset_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(presets)))
}

#[utoipa::path(
    post,
    path = "/api/admin/presets",
    tag = "Presets",
    request_body = CreatePresetPayload,
    responses(
        (status = 201, description = "Preset criado", body = Preset),
        (status = 400, description = "Campo vazio ou código fora do catálogo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_preset(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreatePresetPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let preset = app_state
        .preset_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(preset)))
}

#[utoipa::path(
    put,
    path = "/api/admin/presets/{id}",
    tag = "Presets",
    request_body = UpdatePresetPayload,
    params(("id" = String, Path, description = "ID do preset")),
    responses((status = 200, description = "Preset atualizado", body = Preset)),
    security(("api_jwt" = []))
)]
pub async fn update_preset(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePresetPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let preset = app_state
        .preset_service
        .update(&id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(preset)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/presets/{id}",
    tag = "Presets",
    params(("id" = String, Path, description = "ID do preset")),
    responses((status = 204, description = "Preset removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_preset(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .preset_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/admin/codes
#[utoipa::path(
    get,
    path = "/api/admin/codes",
    tag = "Presets",
    responses((status = 200, description = "Catálogos de sintomas e reparos", body = CodeCatalogs)),
    security(("api_jwt" = []))
)]
pub async fn get_code_catalogs(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let catalogs = app_state
        .preset_service
        .catalogs()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(catalogs)))
}

// PUT /api/admin/codes/{category}: substitui o catálogo inteiro
#[utoipa::path(
    put,
    path = "/api/admin/codes/{category}",
    tag = "Presets",
    request_body = CodeCatalog,
    params(("category" = CodeCategory, Path, description = "symptoms | repairs")),
    responses((status = 200, description = "Catálogo gravado", body = CodeCatalog)),
    security(("api_jwt" = []))
)]
pub async fn put_code_catalog(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(category): Path<CodeCategory>,
    Json(payload): Json<CodeCatalog>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let catalog = app_state
        .preset_service
        .put_catalog(category, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(catalog)))
}
