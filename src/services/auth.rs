// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use validator::ValidateEmail;

use crate::{
    common::error::AppError,
    db::{CredentialRepository, StoreError, SessionRepository, UserRepository},
    models::auth::{AppUser, Claims, Credential, Identity, Role, Session},
};

/// Piso de tamanho de senha do provedor de identidade.
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// Token emitido no login/cadastro, junto com a identidade que ele representa
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub identity: Identity,
}

#[derive(Clone)]
pub struct AuthService {
    credentials: CredentialRepository,
    users: UserRepository,
    sessions: SessionRepository,
    jwt_secret: String,
    session_ttl: Duration,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(
        credentials: CredentialRepository,
        users: UserRepository,
        sessions: SessionRepository,
        jwt_secret: String,
        session_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            users,
            sessions,
            jwt_secret,
            session_ttl,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Cria a credencial e, em seguida, o documento de perfil `users/{uid}`.
    ///
    /// Não há rollback: se a gravação do perfil falhar, a credencial continua
    /// existindo e o usuário fica "autenticado sem perfil".
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<AppUser, AppError> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(AppError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::WeakPassword);
        }

        // 1. Hashing fora do runtime assíncrono
        let password_clone = password.to_owned();
        let cost = self.hash_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 2. Credencial (o id do documento é o e-mail: duplicado falha aqui)
        let uid = uuid::Uuid::new_v4().simple().to_string();
        let credential = Credential {
            email: email.clone(),
            uid: uid.clone(),
            password_hash,
            created_at: Utc::now(),
        };
        self.credentials
            .create_with_id(&email, &credential)
            .await
            .map_err(|e| match e {
                AppError::Store(StoreError::AlreadyExists { .. }) => AppError::EmailAlreadyExists,
                other => other,
            })?;

        // 3. Perfil
        let profile = AppUser {
            uid: uid.clone(),
            name: name.trim().to_string(),
            email,
            role,
        };
        let user = self.users.put(&uid, &profile).await?;

        tracing::info!("👤 Usuário {} cadastrado com papel {:?}", user.uid, user.role);
        Ok(user)
    }

    /// Troca e-mail/senha por uma sessão. Usuário inexistente, senha errada e
    /// e-mail malformado resultam todos em `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AppError> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(AppError::InvalidCredentials);
        }

        let credential = self
            .credentials
            .find(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = credential.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.purge_expired_sessions().await?;
        self.open_session(&credential.uid).await
    }

    /// Apaga as sessões vencidas de todos os usuários. Roda a cada login,
    /// para que a coleção não cresça com tokens que nunca voltam.
    pub async fn purge_expired_sessions(&self) -> Result<usize, AppError> {
        let now = Utc::now();
        let expired: Vec<Session> = self
            .sessions
            .list()
            .await?
            .into_iter()
            .filter(|session| session.expires_at <= now)
            .collect();

        for session in &expired {
            self.sessions.delete(&session.id).await?;
        }
        if !expired.is_empty() {
            tracing::info!("🧹 {} sessões expiradas removidas", expired.len());
        }
        Ok(expired.len())
    }

    /// Abre uma sessão para o uid (usado no login e logo após o cadastro).
    pub async fn open_session(&self, uid: &str) -> Result<IssuedSession, AppError> {
        let now = Utc::now();
        let session = self
            .sessions
            .create(&Session {
                id: String::new(),
                uid: uid.to_string(),
                created_at: now,
                expires_at: now + self.session_ttl,
            })
            .await?;

        let token = self.create_token(&session)?;
        Ok(IssuedSession {
            token,
            identity: Identity {
                uid: session.uid,
                session_id: session.id,
            },
        })
    }

    /// Encerra a sessão: o token deixa de ser aceito imediatamente.
    pub async fn logout(&self, identity: &Identity) -> Result<(), AppError> {
        self.sessions.delete(&identity.session_id).await?;
        tracing::info!("👋 Sessão {} encerrada", identity.session_id);
        Ok(())
    }

    pub async fn validate_token(&self, token: &str) -> Result<Identity, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        let claims = token_data.claims;

        let session = self
            .sessions
            .find(&claims.sid)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if session.uid != claims.sub {
            return Err(AppError::InvalidToken);
        }
        if session.expires_at <= Utc::now() {
            self.sessions.delete(&session.id).await?;
            return Err(AppError::SessionExpired);
        }

        Ok(Identity {
            uid: session.uid,
            session_id: session.id,
        })
    }

    /// Perfil da identidade; `None` quando o documento não existe.
    pub async fn resolve_profile(&self, identity: &Identity) -> Result<Option<AppUser>, AppError> {
        self.users.find(&identity.uid).await
    }

    fn create_token(&self, session: &Session) -> Result<String, AppError> {
        let claims = Claims {
            sub: session.uid.clone(),
            sid: session.id.clone(),
            exp: session.expires_at.timestamp() as usize,
            iat: session.created_at.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DocumentStore, MemoryDocumentStore, Repository};
    use std::sync::Arc;

    // Custo mínimo aceito pelo bcrypt
    const TEST_HASH_COST: u32 = 4;

    fn service_with_store() -> (AuthService, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let service = AuthService::new(
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            "test-secret".to_string(),
            Duration::days(7),
        )
        .with_hash_cost(TEST_HASH_COST);
        (service, store)
    }

    #[tokio::test]
    async fn signup_writes_profile_with_default_role() {
        let (auth, _) = service_with_store();
        let user = auth
            .signup(" Maria@Loja.com ", "segredo123", "Maria", Role::default())
            .await
            .unwrap();

        assert_eq!(user.email, "maria@loja.com");
        assert_eq!(user.role, Role::Technician);
        assert_eq!(auth.users.get(&user.uid).await.unwrap(), user);
    }

    #[tokio::test]
    async fn signup_with_registered_email_creates_no_profile() {
        let (auth, store) = service_with_store();
        auth.signup("ana@loja.com", "segredo123", "Ana", Role::Admin)
            .await
            .unwrap();

        let err = auth
            .signup("ANA@loja.com", "outra-senha", "Ana 2", Role::Technician)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmailAlreadyExists));
        assert_eq!(store.list("users").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn signup_rejects_malformed_email_and_weak_password() {
        let (auth, _) = service_with_store();
        assert!(matches!(
            auth.signup("not-an-email", "segredo123", "X", Role::Technician).await,
            Err(AppError::InvalidEmail)
        ));
        assert!(matches!(
            auth.signup("x@loja.com", "12345", "X", Role::Technician).await,
            Err(AppError::WeakPassword)
        ));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (auth, _) = service_with_store();
        auth.signup("joao@loja.com", "segredo123", "João", Role::Technician)
            .await
            .unwrap();

        for (email, password) in [
            ("joao@loja.com", "errada"),
            ("ninguem@loja.com", "segredo123"),
            ("formato-ruim", "segredo123"),
        ] {
            assert!(matches!(
                auth.login(email, password).await,
                Err(AppError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn logout_invalidates_the_token() {
        let (auth, _) = service_with_store();
        auth.signup("joao@loja.com", "segredo123", "João", Role::Technician)
            .await
            .unwrap();
        let session = auth.login("joao@loja.com", "segredo123").await.unwrap();

        let identity = auth.validate_token(&session.token).await.unwrap();
        assert_eq!(identity, session.identity);

        auth.logout(&identity).await.unwrap();
        assert!(matches!(
            auth.validate_token(&session.token).await,
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn login_purges_expired_sessions() {
        let (auth, store) = service_with_store();
        auth.signup("joao@loja.com", "segredo123", "João", Role::Technician)
            .await
            .unwrap();
        let stale = auth
            .sessions
            .create(&Session {
                id: String::new(),
                uid: "outro".into(),
                created_at: Utc::now() - Duration::days(30),
                expires_at: Utc::now() - Duration::days(23),
            })
            .await
            .unwrap();

        let session = auth.login("joao@loja.com", "segredo123").await.unwrap();

        let remaining = store.list("sessions").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, session.identity.session_id);
        assert!(store.get("sessions", &stale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn profile_less_identity_still_authenticates() {
        let (auth, store) = service_with_store();
        let user = auth
            .signup("sem@perfil.com", "segredo123", "Sem Perfil", Role::Admin)
            .await
            .unwrap();
        store.delete("users", &user.uid).await.unwrap();

        let session = auth.login("sem@perfil.com", "segredo123").await.unwrap();
        let identity = auth.validate_token(&session.token).await.unwrap();
        assert!(auth.resolve_profile(&identity).await.unwrap().is_none());
    }
}
