// src/models/driver.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::validation::validate_not_blank, db::Entity};

// Motorista das rotas de coleta/entrega
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default)]
    pub id: String,
    #[schema(example = "José Pereira")]
    pub name: String,
    #[schema(example = "(11) 98888-7777")]
    pub phone: String,
}

impl Entity for Driver {
    const COLLECTION: &'static str = "drivers";
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDriverPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDriverPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
