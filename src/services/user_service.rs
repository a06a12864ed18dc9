// src/services/user_service.rs

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AdminCreateUserPayload, AppUser, UpdateUserPayload},
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    auth: AuthService,
}

impl UserService {
    pub fn new(users: UserRepository, auth: AuthService) -> Self {
        Self { users, auth }
    }

    pub async fn list(&self) -> Result<Vec<AppUser>, AppError> {
        let mut users = self.users.list().await?;
        users.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(users)
    }

    /// Cadastro feito pelo administrador, com papel escolhido.
    pub async fn create(&self, payload: &AdminCreateUserPayload) -> Result<AppUser, AppError> {
        self.auth
            .signup(&payload.email, &payload.password, &payload.name, payload.role)
            .await
    }

    pub async fn update(&self, uid: &str, payload: &UpdateUserPayload) -> Result<AppUser, AppError> {
        if self.users.find(uid).await?.is_none() {
            return Err(AppError::UserNotFound);
        }
        let payload = UpdateUserPayload {
            name: payload.name.as_ref().map(|n| n.trim().to_string()),
            role: payload.role,
        };
        let user = self.users.update(uid, &payload).await?;
        tracing::info!("👤 Perfil {} atualizado (papel {:?})", user.uid, user.role);
        Ok(user)
    }

    /// Apaga só o perfil; a credencial continua válida (autenticado sem perfil).
    pub async fn delete(&self, uid: &str) -> Result<(), AppError> {
        if self.users.find(uid).await?.is_none() {
            return Err(AppError::UserNotFound);
        }
        self.users.delete(uid).await?;
        tracing::info!("🗑️ Perfil {} removido", uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{DocumentStore, MemoryDocumentStore, Repository},
        models::auth::Role,
    };
    use chrono::Duration;
    use std::sync::Arc;

    const TEST_HASH_COST: u32 = 4;

    fn service() -> (UserService, AuthService) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let auth = AuthService::new(
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            "test-secret".into(),
            Duration::hours(1),
        )
        .with_hash_cost(TEST_HASH_COST);
        (UserService::new(Repository::new(store), auth.clone()), auth)
    }

    fn payload(email: &str, role: Role) -> AdminCreateUserPayload {
        AdminCreateUserPayload {
            email: email.into(),
            password: "segredo123".into(),
            name: "Balcão".into(),
            role,
        }
    }

    #[tokio::test]
    async fn admin_creates_user_with_chosen_role() {
        let (users, _) = service();
        let user = users
            .create(&payload("balcao@loja.com", Role::CounterTechnician))
            .await
            .unwrap();
        assert_eq!(user.role, Role::CounterTechnician);
        assert_eq!(users.list().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn role_update_keeps_other_fields() {
        let (users, _) = service();
        let user = users.create(&payload("a@loja.com", Role::Technician)).await.unwrap();

        let updated = users
            .update(
                &user.uid,
                &UpdateUserPayload {
                    name: None,
                    role: Some(Role::Admin),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.email, user.email);
    }

    #[tokio::test]
    async fn delete_keeps_the_credential() {
        let (users, auth) = service();
        let user = users.create(&payload("b@loja.com", Role::Admin)).await.unwrap();
        users.delete(&user.uid).await.unwrap();

        let session = auth.login("b@loja.com", "segredo123").await.unwrap();
        assert!(auth.resolve_profile(&session.identity).await.unwrap().is_none());
        assert!(matches!(
            users.delete(&user.uid).await,
            Err(AppError::UserNotFound)
        ));
    }
}
