// src/models/dashboard.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    ThisWeek,
    #[default]
    ThisMonth,
    ThisYear,
    AllTime,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// today | this_week | this_month | this_year | all_time
    pub period: Option<Period>,
}

// Desempenho de um técnico no período
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianPerformance {
    pub technician_id: String,
    pub name: String,
    pub goal: Decimal,
    pub order_count: usize,
    pub revenue: Decimal,
    // 0..=100, limitado em 100 mesmo quando a meta é superada
    pub progress_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub period: Period,
    pub total_os_filtered: usize,
    pub total_revenue: Decimal,
    pub technicians: Vec<TechnicianPerformance>,
    pub by_equipment_type: BTreeMap<String, usize>,
    pub by_service_type: BTreeMap<String, usize>,
}
