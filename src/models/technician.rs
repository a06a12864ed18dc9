// src/models/technician.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::validation::{validate_not_blank, validate_not_negative, validate_positive},
    db::Entity,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    #[serde(default)]
    pub id: String,
    #[schema(example = "Carlos Lima")]
    pub name: String,
    // Meta mensal em reais
    #[serde(default)]
    #[schema(example = 5000.0)]
    pub goal: Decimal,
}

impl Entity for Technician {
    const COLLECTION: &'static str = "technicians";
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTechnicianPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub goal: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTechnicianPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetGoalPayload {
    #[validate(custom(function = "validate_not_negative"))]
    pub goal: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistributeGoalPayload {
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = 20000.0)]
    pub global_goal: Decimal,
}
