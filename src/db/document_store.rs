// src/db/document_store.rs

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::broadcast;

/// Corpo de um documento: um objeto JSON sem o id (o id é a chave).
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

/// Notificação emitida a cada escrita (create/set/merge/delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub collection: String,
    pub id: String,
}

impl DocumentChange {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Aviso de que notificações podem ter se perdido (ex.: reconexão do
    /// listener). Quem acompanha algum documento deve relê-lo.
    pub fn resync() -> Self {
        Self {
            collection: String::new(),
            id: String::new(),
        }
    }

    pub fn is_resync(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn is(&self, collection: &str, id: &str) -> bool {
        self.collection == collection && self.id == id
    }

    /// O documento pode ter mudado: alteração nele ou resync.
    pub fn affects(&self, collection: &str, id: &str) -> bool {
        self.is_resync() || self.is(collection, id)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("documento {collection}/{id} não existe")]
    NotFound { collection: String, id: String },

    #[error("documento {collection}/{id} já existe")]
    AlreadyExists { collection: String, id: String },

    #[error("documento não é um objeto JSON")]
    NotAnObject,

    #[error("falha de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("falha no banco: {0}")]
    Database(#[from] sqlx::Error),

    #[error("falha no backend: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// Contrato do banco de documentos: coleções nomeadas de objetos JSON,
/// endereçados por id gerado ou escolhido pelo chamador.
///
/// Não há restrições entre coleções; concorrência é "último a escrever vence".
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Todos os documentos da coleção (ordem não garantida).
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Cria com id gerado e devolve o id.
    async fn add(&self, collection: &str, data: Document) -> Result<String, StoreError>;

    /// Cria com id dado; falha com `AlreadyExists` se o id já estiver ocupado.
    async fn insert(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError>;

    /// Cria ou sobrescreve com id dado.
    async fn set(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError>;

    /// Atualização parcial: só os campos de topo presentes em `patch` são trocados.
    /// Falha com `NotFound` se o documento não existir.
    async fn merge(&self, collection: &str, id: &str, patch: Document) -> Result<(), StoreError>;

    /// Remove; apagar um id inexistente não é erro.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Assina o feed de alterações do store.
    fn changes(&self) -> broadcast::Receiver<DocumentChange>;
}

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Converte qualquer valor serializável em corpo de documento, sem o campo de id.
pub fn to_document<T: serde::Serialize>(value: &T, id_field: &str) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove(id_field);
            Ok(map)
        }
        _ => Err(StoreError::NotAnObject),
    }
}

/// Reconstrói a entidade a partir do id + corpo guardado.
/// O id da chave sempre prevalece sobre um campo homônimo no corpo.
pub fn from_document<T: serde::de::DeserializeOwned>(
    id_field: &str,
    id: &str,
    mut data: Document,
) -> Result<T, StoreError> {
    data.insert(id_field.to_string(), Value::String(id.to_string()));
    Ok(serde_json::from_value(Value::Object(data))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resync_affects_every_document() {
        let resync = DocumentChange::resync();
        assert!(resync.is_resync());
        assert!(resync.affects("users", "u1"));
        assert!(!resync.is("users", "u1"));

        let change = DocumentChange::new("users", "u1");
        assert!(change.affects("users", "u1"));
        assert!(!change.affects("users", "u2"));
        assert!(!change.affects("technicians", "u1"));
    }
}
