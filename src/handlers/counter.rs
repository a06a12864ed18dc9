// src/handlers/counter.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::CurrentUser, i18n::Locale},
    models::counter::{CounterBudgetView, CounterGoalProgress, CreateCounterBudgetPayload},
};

// GET /api/admin/counter-budgets: visão somente leitura do administrador
#[utoipa::path(
    get,
    path = "/api/admin/counter-budgets",
    tag = "Counter",
    responses((status = 200, description = "Orçamentos de balcão, mais recentes primeiro", body = [CounterBudgetView])),
    security(("api_jwt" = []))
)]
pub async fn list_counter_budgets(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let budgets = app_state
        .counter_service
        .list_all()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(budgets)))
}

// GET /api/counter/budgets
#[utoipa::path(
    get,
    path = "/api/counter/budgets",
    tag = "Counter",
    responses((status = 200, description = "Orçamentos do técnico logado", body = [CounterBudgetView])),
    security(("api_jwt" = []))
)]
pub async fn list_own_budgets(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let budgets = app_state
        .counter_service
        .list_own(&user.uid)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(budgets)))
}

// POST /api/counter/budgets
#[utoipa::path(
    post,
    path = "/api/counter/budgets",
    tag = "Counter",
    request_body = CreateCounterBudgetPayload,
    responses(
        (status = 201, description = "Orçamento lançado", body = CounterBudgetView),
        (status = 400, description = "OS vazia ou valor não positivo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_budget(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateCounterBudgetPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let budget = app_state
        .counter_service
        .create(&user.uid, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(budget)))
}

// GET /api/counter/goal
#[utoipa::path(
    get,
    path = "/api/counter/goal",
    tag = "Counter",
    responses((status = 200, description = "Progresso do mês contra a meta do balcão", body = CounterGoalProgress)),
    security(("api_jwt" = []))
)]
pub async fn get_goal_progress(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let progress = app_state
        .counter_service
        .goal_progress(&user.uid)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(progress)))
}
