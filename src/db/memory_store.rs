// src/db/memory_store.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use super::document_store::{
    new_document_id, Document, DocumentChange, DocumentStore, StoreError, StoredDocument,
};

const CHANGE_BUFFER: usize = 256;

// Implementação em memória do DocumentStore.
// Usada nos testes e no modo STORE_BACKEND=memory (desenvolvimento).
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
    changes: broadcast::Sender<DocumentChange>,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            collections: RwLock::new(HashMap::new()),
            changes,
        }
    }

    fn notify(&self, collection: &str, id: &str) {
        // Sem assinantes o send falha, e tudo bem.
        let _ = self.changes.send(DocumentChange::new(collection, id));
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| StoredDocument {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn add(&self, collection: &str, data: Document) -> Result<String, StoreError> {
        let id = new_document_id();
        self.insert(collection, &id, data).await?;
        Ok(id)
    }

    async fn insert(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError> {
        {
            let mut collections = self.collections.write().await;
            let docs = collections.entry(collection.to_string()).or_default();
            if docs.contains_key(id) {
                return Err(StoreError::AlreadyExists {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            }
            docs.insert(id.to_string(), data);
        }
        self.notify(collection, id);
        Ok(())
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        self.notify(collection, id);
        Ok(())
    }

    async fn merge(&self, collection: &str, id: &str, patch: Document) -> Result<(), StoreError> {
        {
            let mut collections = self.collections.write().await;
            let current = collections
                .get_mut(collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            for (field, value) in patch {
                current.insert(field, value);
            }
        }
        self.notify(collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let removed = self
            .collections
            .write()
            .await
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some();
        if removed {
            self.notify(collection, id);
        }
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<DocumentChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn merge_only_touches_given_fields() {
        let store = MemoryDocumentStore::new();
        let id = store
            .add("drivers", doc(json!({ "name": "Ana", "phone": "1199" })))
            .await
            .unwrap();

        store
            .merge("drivers", &id, doc(json!({ "phone": "2188" })))
            .await
            .unwrap();

        let stored = store.get("drivers", &id).await.unwrap().unwrap();
        assert_eq!(stored.get("name"), Some(&json!("Ana")));
        assert_eq!(stored.get("phone"), Some(&json!("2188")));
    }

    #[tokio::test]
    async fn merge_on_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let err = store
            .merge("drivers", "nope", doc(json!({ "phone": "1" })))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn insert_refuses_taken_id_but_set_overwrites() {
        let store = MemoryDocumentStore::new();
        store.insert("users", "u1", doc(json!({ "name": "A" }))).await.unwrap();

        let err = store
            .insert("users", "u1", doc(json!({ "name": "B" })))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));

        store.set("users", "u1", doc(json!({ "name": "C" }))).await.unwrap();
        let stored = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(stored.get("name"), Some(&json!("C")));
    }

    #[tokio::test]
    async fn writes_are_published_on_the_change_feed() {
        let store = MemoryDocumentStore::new();
        let mut feed = store.changes();

        store.set("users", "u1", doc(json!({ "name": "A" }))).await.unwrap();
        store.delete("users", "u1").await.unwrap();

        assert!(feed.recv().await.unwrap().is("users", "u1"));
        assert!(feed.recv().await.unwrap().is("users", "u1"));
    }

    #[tokio::test]
    async fn deleting_missing_document_is_not_an_error() {
        let store = MemoryDocumentStore::new();
        store.delete("drivers", "ghost").await.unwrap();
        assert!(store.list("drivers").await.unwrap().is_empty());
    }
}
