// src/db/repository.rs

use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use super::document_store::{from_document, to_document, DocumentStore, StoreError};
use crate::common::error::AppError;

/// Uma entidade persistida como documento numa coleção fixa.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
    /// Campo da struct que recebe o id do documento.
    const ID_FIELD: &'static str = "id";
}

// Repositório genérico tipado sobre o DocumentStore.
// Toda escrita devolve o documento relido do store: a resposta reflete o
// que ficou gravado, não o que o cliente mandou.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        let docs = self.store.list(T::COLLECTION).await?;
        let entities = docs
            .into_iter()
            .map(|doc| from_document(T::ID_FIELD, &doc.id, doc.data))
            .collect::<Result<Vec<T>, StoreError>>()?;
        Ok(entities)
    }

    pub async fn find(&self, id: &str) -> Result<Option<T>, AppError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(data) => Ok(Some(from_document(T::ID_FIELD, id, data)?)),
            None => Ok(None),
        }
    }

    /// Como `find`, mas ausência vira `StoreError::NotFound`.
    pub async fn get(&self, id: &str) -> Result<T, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, id).into())
    }

    /// Cria com id gerado.
    pub async fn create<P: Serialize>(&self, payload: &P) -> Result<T, AppError> {
        let data = to_document(payload, T::ID_FIELD)?;
        let id = self.store.add(T::COLLECTION, data).await?;
        self.get(&id).await
    }

    /// Cria com id dado; falha se o id já existir.
    pub async fn create_with_id<P: Serialize>(&self, id: &str, payload: &P) -> Result<T, AppError> {
        let data = to_document(payload, T::ID_FIELD)?;
        self.store.insert(T::COLLECTION, id, data).await?;
        self.get(id).await
    }

    /// Cria ou sobrescreve com id dado.
    pub async fn put<P: Serialize>(&self, id: &str, payload: &P) -> Result<T, AppError> {
        let data = to_document(payload, T::ID_FIELD)?;
        self.store.set(T::COLLECTION, id, data).await?;
        self.get(id).await
    }

    /// Merge parcial: campos `None` com `skip_serializing_if` ficam intocados.
    pub async fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<T, AppError> {
        let data = to_document(patch, T::ID_FIELD)?;
        self.store.merge(T::COLLECTION, id, data).await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(T::COLLECTION, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Note {
        #[serde(default)]
        id: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
    }

    impl Entity for Note {
        const COLLECTION: &'static str = "notes";
    }

    #[derive(Serialize)]
    struct NotePatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    }

    fn repo() -> Repository<Note> {
        Repository::new(Arc::new(MemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn create_returns_the_stored_entity_with_generated_id() {
        let repo = repo();
        let note = repo
            .create(&Note { id: "ignored".into(), text: "oi".into(), tag: None })
            .await
            .unwrap();

        assert_ne!(note.id, "ignored");
        assert_eq!(repo.get(&note.id).await.unwrap(), note);
    }

    #[tokio::test]
    async fn update_keeps_fields_missing_from_the_patch() {
        let repo = repo();
        let note = repo
            .create(&Note { id: String::new(), text: "a".into(), tag: Some("x".into()) })
            .await
            .unwrap();

        let updated = repo
            .update(&note.id, &NotePatch { text: Some("b".into()) })
            .await
            .unwrap();

        assert_eq!(updated.text, "b");
        assert_eq!(updated.tag.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn get_on_missing_id_is_not_found() {
        let err = repo().get("missing").await.unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::NotFound { .. })));
    }
}
