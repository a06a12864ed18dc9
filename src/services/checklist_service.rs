// src/services/checklist_service.rs

use chrono::Utc;
use serde::Serialize;

use crate::{
    common::error::AppError,
    db::ChecklistRepository,
    models::checklist::{ChecklistField, ChecklistTemplate, NewChecklist, UploadedFile},
    storage::{StorageError, StorageService},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecklistDocument<'a> {
    name: &'a str,
    fields: &'a [ChecklistField],
    created_at: chrono::DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecklistFilePatch {
    pdf_url: String,
    storage_path: String,
}

pub fn storage_path_for(id: &str, extension: &str) -> String {
    format!("checklists/{}.{}", id, extension)
}

#[derive(Clone)]
pub struct ChecklistService {
    repo: ChecklistRepository,
    storage: StorageService,
}

impl ChecklistService {
    pub fn new(repo: ChecklistRepository, storage: StorageService) -> Self {
        Self { repo, storage }
    }

    pub async fn list(&self) -> Result<Vec<ChecklistTemplate>, AppError> {
        let mut templates = self.repo.list().await?;
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    /// Cria o documento, envia o PDF e grava a URL no documento.
    ///
    /// São três passos sem rollback: se o upload falhar, o documento fica
    /// sem `pdfUrl`.
    pub async fn create(
        &self,
        checklist: &NewChecklist,
        file: UploadedFile,
    ) -> Result<ChecklistTemplate, AppError> {
        let template = self
            .repo
            .create(&ChecklistDocument {
                name: checklist.name.trim(),
                fields: &checklist.fields,
                created_at: Utc::now(),
            })
            .await?;

        let path = storage_path_for(&template.id, &file.extension());
        self.storage
            .upload(&path, file.bytes, &file.content_type)
            .await?;
        let url = self.storage.url(&path).await?;

        let template = self
            .repo
            .update(
                &template.id,
                &ChecklistFilePatch {
                    pdf_url: url,
                    storage_path: path,
                },
            )
            .await?;
        tracing::info!("📋 Checklist {} criado", template.id);
        Ok(template)
    }

    /// URL atual do PDF (renovada quando o storage usa URLs assinadas).
    pub async fn file_url(&self, id: &str) -> Result<String, AppError> {
        let template = self.repo.get(id).await?;
        match template.storage_path {
            Some(path) => Ok(self.storage.url(&path).await?),
            None => Err(AppError::NotFound("checklist file")),
        }
    }

    /// Remove o arquivo e depois o documento. Arquivo já ausente não impede
    /// a remoção; qualquer outro erro de storage interrompe.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let template = self.repo.get(id).await?;

        if let Some(path) = &template.storage_path {
            match self.storage.delete(path).await {
                Ok(()) => {}
                Err(StorageError::NotFound { .. }) => {
                    tracing::warn!("Arquivo '{}' do checklist {} já não existia", path, id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.repo.delete(id).await?;
        tracing::info!("🗑️ Checklist {} removido", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{MemoryDocumentStore, Repository},
        models::checklist::ChecklistFieldKind,
        storage::{StorageConfig, StorageProvider},
    };
    use std::sync::Arc;

    fn service() -> (ChecklistService, StorageService) {
        let storage = StorageService::from_config(
            StorageConfig::new(StorageProvider::Memory).with_public_base_url("https://files.test"),
        )
        .unwrap();
        let service = ChecklistService::new(
            Repository::new(Arc::new(MemoryDocumentStore::new())),
            storage.clone(),
        );
        (service, storage)
    }

    fn new_checklist() -> NewChecklist {
        NewChecklist {
            name: " Instalação - Lavadora ".into(),
            fields: vec![ChecklistField {
                key: "serialNumber".into(),
                label: "Número de série".into(),
                kind: ChecklistFieldKind::Text,
            }],
        }
    }

    fn pdf(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn create_uploads_file_under_the_document_id() {
        let (service, storage) = service();
        let template = service.create(&new_checklist(), pdf("Modelo.PDF")).await.unwrap();

        let path = format!("checklists/{}.pdf", template.id);
        assert_eq!(template.name, "Instalação - Lavadora");
        assert_eq!(template.storage_path.as_deref(), Some(path.as_str()));
        assert_eq!(
            template.pdf_url,
            Some(format!("https://files.test/{}", path))
        );
        assert!(storage.exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_document_and_file() {
        let (service, storage) = service();
        let template = service.create(&new_checklist(), pdf("a.pdf")).await.unwrap();
        let path = template.storage_path.clone().unwrap();

        service.delete(&template.id).await.unwrap();

        assert!(!storage.exists(&path).await.unwrap());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_succeeds_when_file_is_already_gone() {
        let (service, storage) = service();
        let template = service.create(&new_checklist(), pdf("a.pdf")).await.unwrap();
        storage
            .delete(template.storage_path.as_deref().unwrap())
            .await
            .unwrap();

        service.delete(&template.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_url_of_unknown_checklist_is_an_error() {
        let (service, _) = service();
        assert!(service.file_url("ghost").await.is_err());
    }
}
