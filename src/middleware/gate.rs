// src/middleware/gate.rs

//! Gate único de autorização por seção (administração e balcão).
//!
//! A decisão é uma função pura de (seção, caminho, sessão), avaliada uma vez
//! por requisição. O middleware só resolve a sessão e traduz o resultado.

use axum::{
    extract::{OriginalUri, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::{bearer_token, AuthenticatedUser, CurrentUser},
        i18n::Locale,
    },
    models::auth::{AppUser, Identity, Role},
    services::session::ProfileState,
};

pub const HOME_PAGE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Admin,
    Counter,
}

impl Section {
    pub fn allows(self, role: Role) -> bool {
        match self {
            Section::Admin => role == Role::Admin,
            Section::Counter => role == Role::CounterTechnician,
        }
    }

    /// Rota de login da seção na API (fora do shell).
    pub fn api_login_path(self) -> &'static str {
        match self {
            Section::Admin => "/api/admin/login",
            Section::Counter => "/api/counter/login",
        }
    }

    /// Página de login da seção no cliente web.
    pub fn login_page(self) -> &'static str {
        match self {
            Section::Admin => "/admin/login",
            Section::Counter => "/counter/login",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Anonymous,
    /// Sessão válida; `None` quando o perfil não existe
    Active(Option<AppUser>),
}

impl From<&ProfileState> for SessionState {
    fn from(state: &ProfileState) -> Self {
        match state {
            ProfileState::Loading => SessionState::Loading,
            ProfileState::Missing => SessionState::Active(None),
            ProfileState::Loaded(user) => SessionState::Active(Some(user.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Sessão ainda sendo resolvida: nada de redirecionar
    Placeholder,
    /// Rota de login: sem shell e sem checagem
    Standalone,
    RedirectToLogin(&'static str),
    RedirectHome,
    Render(AppUser),
}

pub fn authorize(section: Section, path: &str, session: &SessionState) -> GateOutcome {
    match session {
        SessionState::Loading => GateOutcome::Placeholder,
        _ if path.trim_end_matches('/') == section.api_login_path() => GateOutcome::Standalone,
        SessionState::Anonymous => GateOutcome::RedirectToLogin(section.login_page()),
        SessionState::Active(Some(user)) if section.allows(user.role) => {
            GateOutcome::Render(user.clone())
        }
        SessionState::Active(_) => GateOutcome::RedirectHome,
    }
}

// Token ausente, inválido ou expirado = anônimo; falha remota propaga
async fn resolve_session(
    app_state: &AppState,
    token: Option<String>,
) -> Result<(SessionState, Option<Identity>), AppError> {
    let Some(token) = token else {
        return Ok((SessionState::Anonymous, None));
    };

    let identity = match app_state.auth_service.validate_token(&token).await {
        Ok(identity) => identity,
        Err(AppError::InvalidToken | AppError::SessionExpired) => {
            return Ok((SessionState::Anonymous, None));
        }
        Err(e) => return Err(e),
    };

    let profile = app_state.auth_service.resolve_profile(&identity).await?;
    Ok((SessionState::Active(profile), Some(identity)))
}

async fn section_gate(
    section: Section,
    app_state: AppState,
    locale: Locale,
    path: String,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // O corpo da requisição não é Sync: só o token atravessa o await
    let token = bearer_token(request.headers());
    let (session, identity) = resolve_session(&app_state, token)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let translate = |key: &str| app_state.i18n_store.translate(&locale.0, key);

    match authorize(section, &path, &session) {
        GateOutcome::Standalone => Ok(next.run(request).await),
        GateOutcome::Render(user) => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(AuthenticatedUser(identity));
            }
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        GateOutcome::Placeholder => Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            translate("auth.session_loading"),
        )),
        GateOutcome::RedirectToLogin(page) => Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            translate("auth.login_required"),
        )
        .with_details(json!({ "redirectTo": page }))),
        GateOutcome::RedirectHome => {
            tracing::debug!("Acesso negado à seção {:?} em {}", section, path);
            Err(
                ApiError::new(StatusCode::FORBIDDEN, translate("auth.forbidden"))
                    .with_details(json!({ "redirectTo": HOME_PAGE })),
            )
        }
    }
}

pub async fn admin_gate(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    section_gate(Section::Admin, app_state, locale, uri.path().to_string(), request, next).await
}

pub async fn counter_gate(
    State(app_state): State<AppState>,
    locale: Locale,
    OriginalUri(uri): OriginalUri,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    section_gate(Section::Counter, app_state, locale, uri.path().to_string(), request, next).await
}
