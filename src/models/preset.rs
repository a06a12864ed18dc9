// src/models/preset.rs

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::validation::validate_not_blank, db::Entity};

// Preset de atendimento: combinação pronta de sintoma + reparo para um tipo
// de equipamento, usada para agilizar o preenchimento das OS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    #[serde(default)]
    pub id: String,
    #[schema(example = "Troca de placa - Lavadora")]
    pub name: String,
    #[schema(example = "Lavadora")]
    pub equipment_type: String,
    #[schema(example = "S012")]
    pub symptom_code: String,
    #[schema(example = "R104")]
    pub repair_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl Entity for Preset {
    const COLLECTION: &'static str = "presets";
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePresetPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub equipment_type: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub symptom_code: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub repair_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_part: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePresetPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom_code: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_code: Option<String>,
    // Ausente = não mexe; `null` = apaga
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub replaced_part: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub observations: Option<Option<String>>,
}

// Campo presente no JSON, mesmo que `null`, vira `Some`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// --- Catálogos de códigos (documentos `codes/symptoms` e `codes/repairs`) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CodeCategory {
    Symptoms,
    Repairs,
}

impl CodeCategory {
    pub fn document_id(self) -> &'static str {
        match self {
            CodeCategory::Symptoms => "symptoms",
            CodeCategory::Repairs => "repairs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CodeEntry {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "S012")]
    pub code: String,
    #[schema(example = "Não centrifuga")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CodeCatalog {
    #[serde(default)]
    #[validate(nested)]
    pub entries: Vec<CodeEntry>,
}

impl Entity for CodeCatalog {
    const COLLECTION: &'static str = "codes";
}

impl CodeCatalog {
    /// Catálogo vazio aceita qualquer código (ainda não cadastrado).
    pub fn accepts(&self, code: &str) -> bool {
        self.entries.is_empty() || self.entries.iter().any(|e| e.code == code)
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct CodeCatalogs {
    pub symptoms: Vec<CodeEntry>,
    pub repairs: Vec<CodeEntry>,
}
