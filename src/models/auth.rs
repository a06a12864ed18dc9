// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::validation::validate_not_blank, db::Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    Technician,
    CounterTechnician,
}

// Documento de perfil (`users/{uid}`), 1:1 com a credencial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    #[schema(example = "3f2c9a7e0b1d4c6f8e5a2b7c9d0e1f2a")]
    pub uid: String,
    #[schema(example = "Maria Souza")]
    pub name: String,
    #[schema(example = "maria@assistencia.com.br")]
    pub email: String,
    pub role: Role,
}

impl Entity for AppUser {
    const COLLECTION: &'static str = "users";
    const ID_FIELD: &'static str = "uid";
}

// Credencial do provedor de identidade. O id do documento é o e-mail
// normalizado, o que garante unicidade no próprio store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub email: String,
    pub uid: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Credential {
    const COLLECTION: &'static str = "credentials";
    const ID_FIELD: &'static str = "email";
}

// Sessão aberta pelo login; o logout apaga o documento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub id: String,
    pub uid: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Entity for Session {
    const COLLECTION: &'static str = "sessions";
}

/// Identidade autenticada (sessão válida), independente do perfil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub session_id: String,
}

// E-mail e senha são verificados pelo AuthService, que devolve categorias
// próprias (e-mail inválido, senha fraca); aqui só o nome.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupPayload {
    #[schema(example = "maria@assistencia.com.br")]
    pub email: String,
    #[schema(example = "segredo123")]
    pub password: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Maria Souza")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminCreateUserPayload {
    pub email: String,
    pub password: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    // Ausente quando o perfil não existe (autenticado, mas sem perfil)
    pub user: Option<AppUser>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionInfo {
    pub uid: String,
    pub profile: Option<AppUser>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // uid
    pub sid: String, // id da sessão
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}
