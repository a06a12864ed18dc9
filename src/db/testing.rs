// src/db/testing.rs

//! Store em memória com feed de alterações controlado pelo teste.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{
    document_store::{Document, DocumentChange, DocumentStore, StoreError, StoredDocument},
    MemoryDocumentStore,
};

pub(crate) struct ScriptedStore {
    inner: MemoryDocumentStore,
    feed: broadcast::Sender<DocumentChange>,
    muted: Mutex<bool>,
    failing_merge: Mutex<Option<String>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(64);
        Self {
            inner: MemoryDocumentStore::new(),
            feed,
            muted: Mutex::new(false),
            failing_merge: Mutex::new(None),
        }
    }

    /// Escritas seguintes não geram notificação.
    pub fn mute(&self, muted: bool) {
        *self.muted.lock().unwrap() = muted;
    }

    /// `merge` passa a falhar para este id.
    pub fn fail_merges_for(&self, id: &str) {
        *self.failing_merge.lock().unwrap() = Some(id.to_string());
    }

    pub fn publish(&self, change: DocumentChange) {
        let _ = self.feed.send(change);
    }

    fn announce(&self, collection: &str, id: &str) {
        if !*self.muted.lock().unwrap() {
            self.publish(DocumentChange::new(collection, id));
        }
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn add(&self, collection: &str, data: Document) -> Result<String, StoreError> {
        let id = self.inner.add(collection, data).await?;
        self.announce(collection, &id);
        Ok(id)
    }

    async fn insert(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError> {
        self.inner.insert(collection, id, data).await?;
        self.announce(collection, id);
        Ok(())
    }

    async fn set(&self, collection: &str, id: &str, data: Document) -> Result<(), StoreError> {
        self.inner.set(collection, id, data).await?;
        self.announce(collection, id);
        Ok(())
    }

    async fn merge(&self, collection: &str, id: &str, patch: Document) -> Result<(), StoreError> {
        let fails = self.failing_merge.lock().unwrap().as_deref() == Some(id);
        if fails {
            return Err(StoreError::Backend("connection reset".into()));
        }
        self.inner.merge(collection, id, patch).await?;
        self.announce(collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.inner.delete(collection, id).await?;
        self.announce(collection, id);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<DocumentChange> {
        self.feed.subscribe()
    }
}
