// src/services/preset_service.rs

use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::{CodeCatalogRepository, PresetRepository},
    models::preset::{
        CodeCatalog, CodeCatalogs, CodeCategory, CreatePresetPayload, Preset, UpdatePresetPayload,
    },
};

#[derive(Clone)]
pub struct PresetService {
    presets: PresetRepository,
    codes: CodeCatalogRepository,
}

fn unknown_code(field: &'static str, code: &str) -> AppError {
    let mut err = ValidationError::new("unknown_code");
    err.message = Some(format!("O código '{}' não existe no catálogo.", code).into());
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    AppError::ValidationError(errors)
}

impl PresetService {
    pub fn new(presets: PresetRepository, codes: CodeCatalogRepository) -> Self {
        Self { presets, codes }
    }

    pub async fn list(&self) -> Result<Vec<Preset>, AppError> {
        let mut presets = self.presets.list().await?;
        presets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(presets)
    }

    async fn catalog(&self, category: CodeCategory) -> Result<CodeCatalog, AppError> {
        Ok(self
            .codes
            .find(category.document_id())
            .await?
            .unwrap_or_default())
    }

    pub async fn catalogs(&self) -> Result<CodeCatalogs, AppError> {
        Ok(CodeCatalogs {
            symptoms: self.catalog(CodeCategory::Symptoms).await?.entries,
            repairs: self.catalog(CodeCategory::Repairs).await?.entries,
        })
    }

    pub async fn put_catalog(
        &self,
        category: CodeCategory,
        catalog: &CodeCatalog,
    ) -> Result<CodeCatalog, AppError> {
        self.codes.put(category.document_id(), catalog).await
    }

    async fn check_codes(
        &self,
        symptom_code: Option<&str>,
        repair_code: Option<&str>,
    ) -> Result<(), AppError> {
        if let Some(code) = symptom_code {
            if !self.catalog(CodeCategory::Symptoms).await?.accepts(code) {
                return Err(unknown_code("symptomCode", code));
            }
        }
        if let Some(code) = repair_code {
            if !self.catalog(CodeCategory::Repairs).await?.accepts(code) {
                return Err(unknown_code("repairCode", code));
            }
        }
        Ok(())
    }

    pub async fn create(&self, payload: &CreatePresetPayload) -> Result<Preset, AppError> {
        self.check_codes(Some(&payload.symptom_code), Some(&payload.repair_code))
            .await?;
        self.presets.create(payload).await
    }

    pub async fn update(&self, id: &str, payload: &UpdatePresetPayload) -> Result<Preset, AppError> {
        self.check_codes(payload.symptom_code.as_deref(), payload.repair_code.as_deref())
            .await?;
        self.presets.update(id, payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.presets.get(id).await?;
        self.presets.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{DocumentStore, MemoryDocumentStore, Repository},
        models::preset::CodeEntry,
    };
    use std::sync::Arc;

    fn service() -> PresetService {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        PresetService::new(Repository::new(store.clone()), Repository::new(store))
    }

    fn payload(symptom: &str, repair: &str) -> CreatePresetPayload {
        CreatePresetPayload {
            name: "Troca de placa".into(),
            equipment_type: "Lavadora".into(),
            symptom_code: symptom.into(),
            repair_code: repair.into(),
            replaced_part: Some("Placa principal".into()),
            observations: None,
        }
    }

    #[tokio::test]
    async fn codes_are_checked_against_the_catalog() {
        let service = service();
        service
            .put_catalog(
                CodeCategory::Symptoms,
                &CodeCatalog {
                    entries: vec![CodeEntry {
                        code: "S012".into(),
                        description: "Não centrifuga".into(),
                    }],
                },
            )
            .await
            .unwrap();

        // catálogo de reparos vazio aceita qualquer código
        let preset = service.create(&payload("S012", "R999")).await.unwrap();
        assert_eq!(preset.replaced_part.as_deref(), Some("Placa principal"));

        let err = service.create(&payload("S999", "R999")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn explicit_null_clears_optional_fields() {
        let service = service();
        let preset = service.create(&payload("S012", "R104")).await.unwrap();

        let untouched: UpdatePresetPayload =
            serde_json::from_value(serde_json::json!({ "name": "Troca de placa (lavadora)" }))
                .unwrap();
        let preset = service.update(&preset.id, &untouched).await.unwrap();
        assert_eq!(preset.replaced_part.as_deref(), Some("Placa principal"));

        let cleared: UpdatePresetPayload =
            serde_json::from_value(serde_json::json!({ "replacedPart": null })).unwrap();
        assert_eq!(cleared.replaced_part, Some(None));
        let preset = service.update(&preset.id, &cleared).await.unwrap();

        assert_eq!(preset.name, "Troca de placa (lavadora)");
        assert_eq!(preset.replaced_part, None);
    }

    #[tokio::test]
    async fn catalogs_default_to_empty() {
        let catalogs = service().catalogs().await.unwrap();
        assert!(catalogs.symptoms.is_empty());
        assert!(catalogs.repairs.is_empty());
    }
}
