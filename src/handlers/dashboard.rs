// src/handlers/dashboard.rs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    // Importamos os models para referenciar no Swagger
    models::{
        dashboard::{DashboardSummary, Period, PeriodQuery},
        service_order::ServiceOrder,
    },
};

// `period` ausente = mês corrente; valor desconhecido vira erro localizado
fn requested_period(query: Result<Query<PeriodQuery>, QueryRejection>) -> Result<Period, AppError> {
    match query {
        Ok(Query(query)) => Ok(query.period.unwrap_or_default()),
        Err(rejection) => Err(AppError::InvalidPeriod(rejection.body_text())),
    }
}

// GET /api/admin/dashboard?period=this_month
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Dashboard",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Indicadores do período", body = DashboardSummary),
        (status = 400, description = "Período inválido"),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Sem acesso à seção")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let period = requested_period(query)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;
    let summary = app_state
        .dashboard_service
        .summary(period)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/admin/service-orders?period=today
#[utoipa::path(
    get,
    path = "/api/admin/service-orders",
    tag = "Dashboard",
    params(PeriodQuery),
    responses(
        (status = 200, description = "OS do período, somente leitura", body = [ServiceOrder]),
        (status = 400, description = "Período inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_service_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let period = requested_period(query)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;
    let orders = app_state
        .dashboard_service
        .list_orders(period)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}
