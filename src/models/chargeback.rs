// src/models/chargeback.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::validation::{validate_not_blank, validate_positive},
    db::Entity,
};

// Estorno lançado contra um técnico por uma OS.
// O nome do técnico NÃO é gravado: é resolvido na leitura (ChargebackView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Chargeback {
    #[serde(default)]
    pub id: String,
    pub technician_id: String,
    #[schema(example = "4172839465")]
    pub service_order_number: String,
    #[schema(example = 150.0)]
    pub value: Decimal,
    #[schema(example = "Peça devolvida com defeito")]
    pub reason: String,
    pub date: NaiveDate,
}

impl Entity for Chargeback {
    const COLLECTION: &'static str = "chargebacks";
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargebackView {
    #[serde(flatten)]
    pub chargeback: Chargeback,
    // None quando o técnico foi excluído
    pub technician_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargebackPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub technician_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub service_order_number: String,
    #[validate(custom(function = "validate_positive"))]
    pub value: Decimal,
    #[validate(custom(function = "validate_not_blank"))]
    pub reason: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChargebackPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_order_number: Option<String>,
    #[validate(custom(function = "validate_positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}
