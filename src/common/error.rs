// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    common::i18n::I18nStore,
    db::StoreError,
    middleware::i18n::Locale,
    storage::StorageError,
};

// Erro interno da aplicação. Serviços e repositórios só conhecem este tipo;
// a tradução para HTTP acontece em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("E-mail inválido")]
    InvalidEmail,

    #[error("Senha fraca")]
    WeakPassword,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Sessão expirada")]
    SessionExpired,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Recurso não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Nenhum técnico cadastrado")]
    NoTechnicians,

    #[error("Meta inválida")]
    InvalidGoal,

    #[error("Arquivo ausente no formulário")]
    MissingFile,

    #[error("Formulário multipart inválido: {0}")]
    InvalidMultipart(String),

    #[error("Período inválido: {0}")]
    InvalidPeriod(String),

    #[error("Erro no document store: {0}")]
    Store(#[from] StoreError),

    #[error("Erro no object storage: {0}")]
    Storage(#[from] StorageError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que efetivamente sai pela API, já traduzido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    // Chave usada no I18nStore e status HTTP de cada variante
    fn key_and_status(&self) -> (&'static str, StatusCode) {
        match self {
            AppError::ValidationError(_) => ("validation.failed", StatusCode::BAD_REQUEST),
            AppError::EmailAlreadyExists => ("auth.email_in_use", StatusCode::CONFLICT),
            AppError::InvalidEmail => ("auth.invalid_email", StatusCode::BAD_REQUEST),
            AppError::WeakPassword => ("auth.weak_password", StatusCode::BAD_REQUEST),
            AppError::InvalidCredentials => ("auth.invalid_credentials", StatusCode::UNAUTHORIZED),
            AppError::InvalidToken => ("auth.invalid_token", StatusCode::UNAUTHORIZED),
            AppError::SessionExpired => ("auth.session_expired", StatusCode::UNAUTHORIZED),
            AppError::UserNotFound => ("users.not_found", StatusCode::NOT_FOUND),
            AppError::NotFound(_) => ("resource.not_found", StatusCode::NOT_FOUND),
            AppError::NoTechnicians => ("technicians.empty", StatusCode::UNPROCESSABLE_ENTITY),
            AppError::InvalidGoal => ("technicians.invalid_goal", StatusCode::BAD_REQUEST),
            AppError::MissingFile => ("checklists.missing_file", StatusCode::BAD_REQUEST),
            AppError::InvalidMultipart(_) => ("checklists.invalid_form", StatusCode::BAD_REQUEST),
            AppError::InvalidPeriod(_) => ("dashboard.invalid_period", StatusCode::BAD_REQUEST),
            AppError::Store(StoreError::NotFound { .. }) => ("resource.not_found", StatusCode::NOT_FOUND),
            AppError::Store(_)
            | AppError::Storage(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => ("internal.unexpected", StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Converte o erro interno na resposta pública, traduzida para o idioma do cliente.
    ///
    /// Falhas remotas (store, storage, hash, JWT) são logadas aqui; erros de
    /// validação e de regra de negócio não.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let (key, status) = self.key_and_status();
        let message = i18n.translate(&locale.0, key);

        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError::new(status, message).with_details(json!(details))
            }
            AppError::NotFound(resource) => {
                ApiError::new(status, message).with_details(json!({ "resource": resource }))
            }
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("🔥 Erro Interno do Servidor: {}", self);
                ApiError::new(status, message)
            }
            _ => ApiError::new(status, message),
        }
    }
}

// Atalho para quem não tem Locale à mão (middlewares, testes).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_in_use_maps_to_conflict_in_portuguese() {
        let api = AppError::EmailAlreadyExists
            .to_api_error(&Locale("pt".into()), &I18nStore::default());
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.error, "Este e-mail já está em uso.");
    }

    #[test]
    fn store_not_found_is_a_404() {
        let err = AppError::Store(StoreError::NotFound {
            collection: "drivers".into(),
            id: "x".into(),
        });
        let api = err.to_api_error(&Locale("en".into()), &I18nStore::default());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn remote_failures_hide_the_cause() {
        let err = AppError::Store(StoreError::Backend("connection reset".into()));
        let api = err.to_api_error(&Locale("en".into()), &I18nStore::default());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("connection reset"));
    }
}
