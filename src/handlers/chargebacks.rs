// src/handlers/chargebacks.rs

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
    models::chargeback::{ChargebackView, CreateChargebackPayload, UpdateChargebackPayload},
};

#[utoipa::path(
    get,
    path = "/api/admin/chargebacks",
    tag = "Chargebacks",
    responses((status = 200, description = "Estornos, mais recentes primeiro", body = [ChargebackView])),
    security(("api_jwt" = []))
)]
pub async fn list_chargebacks(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let chargebacks = app_state
        .chargeback_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(chargebacks)))
}

// POST /api/admin/chargebacks (também /api/counter/chargebacks)
#[utoipa::path(
    post,
    path = "/api/admin/chargebacks",
    tag = "Chargebacks",
    request_body = CreateChargebackPayload,
    responses(
        (status = 201, description = "Estorno lançado", body = ChargebackView),
        (status = 404, description = "Técnico não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_chargeback(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateChargebackPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let chargeback = app_state
        .chargeback_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(chargeback)))
}

#[utoipa::path(
    put,
    path = "/api/admin/chargebacks/{id}",
    tag = "Chargebacks",
    request_body = UpdateChargebackPayload,
    params(("id" = String, Path, description = "ID do estorno")),
    responses((status = 200, description = "Estorno atualizado", body = ChargebackView)),
    security(("api_jwt" = []))
)]
pub async fn update_chargeback(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<UpdateChargebackPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let chargeback = app_state
        .chargeback_service
        .update(&id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(chargeback)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/chargebacks/{id}",
    tag = "Chargebacks",
    params(("id" = String, Path, description = "ID do estorno")),
    responses((status = 204, description = "Estorno removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_chargeback(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .chargeback_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
