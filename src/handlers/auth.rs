// src/handlers/auth.rs

use std::convert::Infallible;

use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::Stream;
use tokio_stream::{wrappers::WatchStream, StreamExt};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{AppUser, AuthResponse, LoginPayload, Role, SessionInfo, SignupPayload},
    services::session::SessionContext,
};

// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Usuário criado e sessão aberta", body = AuthResponse),
        (status = 400, description = "E-mail inválido, senha fraca ou nome vazio"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn signup(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // Cadastro público: sempre com o papel padrão
    let user = app_state
        .auth_service
        .signup(&payload.email, &payload.password, &payload.name, Role::default())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let session = app_state
        .auth_service
        .open_session(&user.uid)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: session.token,
            user: Some(user),
        }),
    ))
}

// POST /api/auth/login (também /api/admin/login e /api/counter/login)
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão aberta; `user` ausente se o perfil não existir", body = AuthResponse),
        (status = 401, description = "E-mail ou senha inválidos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let session = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .resolve_profile(&session.identity)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            token: session.token,
            user,
        }),
    ))
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .auth_service
        .logout(&identity)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Identidade e perfil (nulo se não existir)", body = SessionInfo),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<Json<SessionInfo>, ApiError> {
    let profile: Option<AppUser> = app_state
        .auth_service
        .resolve_profile(&identity)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(SessionInfo {
        uid: identity.uid,
        profile,
    }))
}

/// GET /api/auth/me/stream
///
/// Server-Sent Events com o estado do perfil. A assinatura vive enquanto a
/// conexão estiver aberta.
pub async fn stream_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let context = SessionContext::open(app_state.store.clone(), identity);
    let updates = WatchStream::new(context.subscribe());

    let stream = updates.map(move |state| {
        // O contexto é dono da assinatura: sai de escopo junto com o stream
        let _alive = &context;
        Ok(Event::default()
            .event("profile")
            .json_data(&state)
            .unwrap_or_else(|_| Event::default().event("error")))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
