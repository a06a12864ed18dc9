// src/models/counter.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::validation::{validate_not_blank, validate_positive},
    db::Entity,
};

// Orçamento lançado pelo técnico de balcão.
// `technicianId` é o uid do técnico de balcão; o nome vem do perfil na leitura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterBudget {
    #[serde(default)]
    pub id: String,
    pub technician_id: String,
    #[schema(example = "4172839465")]
    pub service_order_number: String,
    #[schema(example = 480.0)]
    pub value: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub observations: Option<String>,
}

impl Entity for CounterBudget {
    const COLLECTION: &'static str = "counterBudgets";
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterBudgetView {
    #[serde(flatten)]
    pub budget: CounterBudget,
    pub technician_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCounterBudgetPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub service_order_number: String,
    #[validate(custom(function = "validate_positive"))]
    pub value: Decimal,
    // Hoje (fuso configurado) quando ausente
    pub date: Option<NaiveDate>,
    pub observations: Option<String>,
}

// O que é gravado: o técnico vem da sessão, não do corpo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCounterBudget {
    pub technician_id: String,
    pub service_order_number: String,
    pub value: Decimal,
    pub date: NaiveDate,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterGoalProgress {
    #[schema(example = "2026-10")]
    pub month: String,
    pub goal: Decimal,
    pub total: Decimal,
    pub budget_count: usize,
    pub progress_percent: Decimal,
}
