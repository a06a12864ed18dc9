// src/models/settings.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::validation::{validate_not_blank, validate_not_negative},
    db::Entity,
};

pub const COUNTER_GOAL_ID: &str = "counterGoal";
pub const VISIT_ANNOUNCEMENT_ID: &str = "visitAnnouncement";

// `configs/counterGoal`: meta mensal de orçamentos do balcão
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CounterGoal {
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 15000.0)]
    pub value: Decimal,
}

impl Entity for CounterGoal {
    const COLLECTION: &'static str = "configs";
}

// `textTemplates/visitAnnouncement`: texto enviado ao cliente antes da visita
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct VisitAnnouncement {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Olá {cliente}, nosso técnico chegará entre {inicio} e {fim}.")]
    pub text: String,
}

impl Entity for VisitAnnouncement {
    const COLLECTION: &'static str = "textTemplates";
}
