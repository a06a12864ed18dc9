// src/services/session.rs

use std::sync::Arc;

use serde::Serialize;
use tokio::{
    sync::{broadcast::error::RecvError, watch},
    task::JoinHandle,
};

use crate::{
    db::{DocumentStore, Entity, Repository, UserRepository},
    models::auth::{AppUser, Identity},
};

// Serializado como {"status": "loaded", "user": {...}}
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum ProfileState {
    /// Ainda não lido
    Loading,
    /// Sessão válida, mas `users/{uid}` não existe
    Missing,
    Loaded(AppUser),
}

impl ProfileState {
    pub fn profile(&self) -> Option<&AppUser> {
        match self {
            ProfileState::Loaded(user) => Some(user),
            _ => None,
        }
    }
}

/// Contexto explícito de uma sessão autenticada.
///
/// Mantém a assinatura do documento de perfil enquanto viver: qualquer
/// alteração em `users/{uid}` (papel, nome) é relida e publicada no canal
/// `watch`. Ao ser descartado, a assinatura é cancelada.
pub struct SessionContext {
    identity: Identity,
    profile: watch::Receiver<ProfileState>,
    listener: JoinHandle<()>,
}

impl SessionContext {
    pub fn open(store: Arc<dyn DocumentStore>, identity: Identity) -> Self {
        let (tx, rx) = watch::channel(ProfileState::Loading);
        // Assina antes da primeira leitura para não perder escritas no intervalo
        let mut changes = store.changes();
        let users: UserRepository = Repository::new(store);
        let uid = identity.uid.clone();

        let listener = tokio::spawn(async move {
            refresh(&users, &uid, &tx).await;
            loop {
                match changes.recv().await {
                    Ok(change) if change.affects(AppUser::COLLECTION, &uid) => {
                        refresh(&users, &uid, &tx).await
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Feed de perfil atrasado ({} eventos); relendo", skipped);
                        refresh(&users, &uid, &tx).await;
                    }
                    Err(RecvError::Closed) => break,
                }
                if tx.is_closed() {
                    break;
                }
            }
        });

        Self {
            identity,
            profile: rx,
            listener,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn current(&self) -> ProfileState {
        self.profile.borrow().clone()
    }

    /// Novo receptor do estado do perfil (cada um vê a partir do valor atual).
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.profile.clone()
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn refresh(users: &UserRepository, uid: &str, tx: &watch::Sender<ProfileState>) {
    let next = match users.find(uid).await {
        Ok(Some(user)) => ProfileState::Loaded(user),
        Ok(None) => ProfileState::Missing,
        Err(e) => {
            // Mantém o último estado conhecido
            tracing::error!("Falha ao ler o perfil {}: {}", uid, e);
            return;
        }
    };
    tx.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{testing::ScriptedStore, DocumentChange, MemoryDocumentStore},
        models::auth::Role,
    };
    use std::time::Duration;

    async fn wait_for(
        rx: &mut watch::Receiver<ProfileState>,
        predicate: impl Fn(&ProfileState) -> bool,
    ) -> ProfileState {
        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| predicate(s)))
            .await
            .expect("perfil não publicado a tempo")
            .expect("canal fechado")
            .clone()
    }

    fn identity() -> Identity {
        Identity {
            uid: "u1".into(),
            session_id: "s1".into(),
        }
    }

    #[tokio::test]
    async fn role_changes_propagate_live() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let users: UserRepository = Repository::new(store.clone());
        let mut user = AppUser {
            uid: "u1".into(),
            name: "Ana".into(),
            email: "ana@loja.com".into(),
            role: Role::Technician,
        };
        users.put("u1", &user).await.unwrap();

        let ctx = SessionContext::open(store.clone(), identity());
        let mut rx = ctx.subscribe();
        wait_for(&mut rx, |s| matches!(s, ProfileState::Loaded(_))).await;

        user.role = Role::Admin;
        users.put("u1", &user).await.unwrap();

        let state = wait_for(&mut rx, |s| {
            s.profile().map(|u| u.role == Role::Admin).unwrap_or(false)
        })
        .await;
        assert_eq!(state.profile().unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn resync_rereads_a_profile_changed_without_notice() {
        let scripted = Arc::new(ScriptedStore::new());
        let store: Arc<dyn DocumentStore> = scripted.clone();
        let users: UserRepository = Repository::new(store.clone());
        let mut user = AppUser {
            uid: "u1".into(),
            name: "Ana".into(),
            email: "ana@loja.com".into(),
            role: Role::Technician,
        };
        users.put("u1", &user).await.unwrap();

        let ctx = SessionContext::open(store, identity());
        let mut rx = ctx.subscribe();
        wait_for(&mut rx, |s| matches!(s, ProfileState::Loaded(_))).await;

        // Escrita cuja notificação se perdeu
        scripted.mute(true);
        user.role = Role::CounterTechnician;
        users.put("u1", &user).await.unwrap();
        assert_eq!(ctx.current().profile().unwrap().role, Role::Technician);

        scripted.publish(DocumentChange::resync());
        let state = wait_for(&mut rx, |s| {
            s.profile().map(|u| u.role == Role::CounterTechnician).unwrap_or(false)
        })
        .await;
        assert_eq!(state.profile().unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn missing_profile_is_reported_as_missing() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let ctx = SessionContext::open(store, identity());
        let mut rx = ctx.subscribe();

        let state = wait_for(&mut rx, |s| *s != ProfileState::Loading).await;
        assert_eq!(state, ProfileState::Missing);
    }

    #[tokio::test]
    async fn dropping_the_context_stops_the_listener() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let ctx = SessionContext::open(store, identity());
        let rx = ctx.subscribe();
        drop(ctx);

        // O sender vive na task abortada: o canal fecha
        tokio::time::timeout(Duration::from_secs(2), async {
            let mut rx = rx;
            while rx.changed().await.is_ok() {}
        })
        .await
        .expect("listener continuou vivo");
    }
}
