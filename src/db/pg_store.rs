// src/db/pg_store.rs

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgListener, types::Json, PgPool, Row};
use tokio::sync::broadcast;

use super::document_store::{
    new_document_id, Document, DocumentChange, DocumentStore, StoreError, StoredDocument,
};

const CHANGE_CHANNEL: &str = "document_changes";
const CHANGE_BUFFER: usize = 1024;
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

// Document store sobre uma única tabela JSONB (ver migrations/).
// O feed de alterações vem do trigger `documents_notify` via LISTEN/NOTIFY.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    changes: broadcast::Sender<DocumentChange>,
}

impl PgDocumentStore {
    /// Cria o store e começa a escutar o canal de notificações.
    pub async fn connect(pool: PgPool) -> Result<Self, StoreError> {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);

        let mut listener = listen(&pool).await?;
        tracing::info!("👂 Escutando alterações em '{}'", CHANGE_CHANNEL);

        let sender = changes.clone();
        let listener_pool = pool.clone();
        tokio::spawn(async move {
            loop {
                match listener.try_recv().await {
                    Ok(Some(notification)) => {
                        if let Some((collection, id)) = notification.payload().split_once('/') {
                            let _ = sender.send(DocumentChange::new(collection, id));
                        }
                    }
                    // Conexão caiu: o que foi notificado nesse intervalo se perdeu
                    lost => {
                        if let Err(e) = lost {
                            tracing::warn!("Falha no listener de documentos: {}", e);
                        }
                        tracing::warn!("Listener de documentos desconectado; reconectando");
                        listener = reconnect(&listener_pool).await;
                        tracing::info!("👂 Listener de documentos reconectado");
                        let _ = sender.send(DocumentChange::resync());
                    }
                }
            }
        });

        Ok(Self { pool, changes })
    }
}

async fn listen(pool: &PgPool) -> Result<PgListener, sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANGE_CHANNEL).await?;
    Ok(listener)
}

// Tenta até conseguir, com 1s entre tentativas
async fn reconnect(pool: &PgPool) -> PgListener {
    loop {
        match listen(pool).await {
            Ok(listener) => return listener,
            Err(e) => {
                tracing::error!("Falha ao reconectar o listener de documentos: {}", e);
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

fn into_document(value: Value) -> Result<Document, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let Json(data): Json<Value> = row.try_get("data")?;
                Ok(StoredDocument {
                    id: row.try_get("id")?,
                    data: into_document(data)?,
                })
            })
            .collect()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let Json(data): Json<Value> = row.try_get("data")?;
                Ok(Some(into_document(data)?))
            }
            None => Ok(None),
        }
    }

    async fn add(&self, collection: &str, data: Document) -> Result<String, StoreError> {
        let id = new_document_id();
        self.insert(collection, &id, data).await?;
        Ok(id)
    }

    async fn insert(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(data)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(data)))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn merge(&self, collection: &str, id: &str, patch: Document) -> Result<(), StoreError> {
        // `||` em JSONB substitui apenas as chaves de topo presentes no patch
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = data || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(patch)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<DocumentChange> {
        self.changes.subscribe()
    }
}
