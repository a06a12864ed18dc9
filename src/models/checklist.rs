// src/models/checklist.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::validation::validate_not_blank, db::Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistFieldKind {
    Text,
    Checkbox,
    Date,
    Signature,
}

// Campo preenchível do PDF do checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChecklistField {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "serialNumber")]
    pub key: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Número de série")]
    pub label: String,
    pub kind: ChecklistFieldKind,
}

// O PDF fica no object storage em `checklists/{id}.{ext}`;
// `storagePath` é a referência usada para apagá-lo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistTemplate {
    #[serde(default)]
    pub id: String,
    #[schema(example = "Checklist de instalação - Refrigerador")]
    pub name: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub fields: Vec<ChecklistField>,
    pub created_at: DateTime<Utc>,
}

impl Entity for ChecklistTemplate {
    const COLLECTION: &'static str = "checklistTemplates";
}

// Parte textual do formulário multipart de criação
#[derive(Debug, Validate)]
pub struct NewChecklist {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(nested)]
    pub fields: Vec<ChecklistField>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Extensão original, em minúsculas; "pdf" quando o nome não tem extensão.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_else(|| "pdf".to_string())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistFileLink {
    pub url: String,
}
