// src/models/service_order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::db::Entity;

/// Tipo de serviço cujo orçamento aprovado conta como faturamento.
pub const SAMSUNG_BUDGET_SERVICE_TYPE: &str = "samsung_budget";

// Ordem de serviço. Criada pelo app de campo; aqui é somente leitura.
// Campos específicos de cada tipo de serviço ficam em `extra`, intocados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    #[serde(default)]
    pub id: String,
    pub technician_id: String,
    pub date: DateTime<Utc>,
    #[schema(example = "Lavadora")]
    pub equipment_type: String,
    #[schema(example = "samsung_budget")]
    pub service_type: String,
    #[serde(default)]
    pub samsung_budget_value: Option<Decimal>,
    #[serde(default)]
    pub samsung_budget_approved: Option<bool>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl Entity for ServiceOrder {
    const COLLECTION: &'static str = "serviceOrders";
}

impl ServiceOrder {
    /// Valor que entra no faturamento: só orçamento Samsung aprovado e com valor.
    pub fn approved_budget_value(&self) -> Option<Decimal> {
        if self.service_type == SAMSUNG_BUDGET_SERVICE_TYPE
            && self.samsung_budget_approved == Some(true)
        {
            self.samsung_budget_value
        } else {
            None
        }
    }
}
