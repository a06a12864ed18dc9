// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Technicians ---
        handlers::technicians::list_technicians,
        handlers::technicians::create_technician,
        handlers::technicians::update_technician,
        handlers::technicians::set_technician_goal,
        handlers::technicians::distribute_goal,
        handlers::technicians::delete_technician,

        // --- Drivers ---
        handlers::drivers::list_drivers,
        handlers::drivers::create_driver,
        handlers::drivers::update_driver,
        handlers::drivers::delete_driver,

        // --- Presets ---
        handlers::presets::list_presets,
        handlers::presets::create_preset,
        handlers::presets::update_preset,
        handlers::presets::delete_preset,
        handlers::presets::get_code_catalogs,
        handlers::presets::put_code_catalog,

        // --- Chargebacks ---
        handlers::chargebacks::list_chargebacks,
        handlers::chargebacks::create_chargeback,
        handlers::chargebacks::update_chargeback,
        handlers::chargebacks::delete_chargeback,

        // --- Checklists ---
        handlers::checklists::list_checklists,
        handlers::checklists::create_checklist,
        handlers::checklists::get_checklist_file,
        handlers::checklists::delete_checklist,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Counter ---
        handlers::counter::list_counter_budgets,
        handlers::counter::list_own_budgets,
        handlers::counter::create_budget,
        handlers::counter::get_goal_progress,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::list_service_orders,

        // --- Settings ---
        handlers::settings::get_counter_goal,
        handlers::settings::update_counter_goal,
        handlers::settings::get_visit_announcement,
        handlers::settings::update_visit_announcement,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::AppUser,
            models::auth::SignupPayload,
            models::auth::AdminCreateUserPayload,
            models::auth::LoginPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,
            models::auth::SessionInfo,

            // --- Cadastros ---
            models::technician::Technician,
            models::technician::CreateTechnicianPayload,
            models::technician::UpdateTechnicianPayload,
            models::technician::SetGoalPayload,
            models::technician::DistributeGoalPayload,
            models::driver::Driver,
            models::driver::CreateDriverPayload,
            models::driver::UpdateDriverPayload,
            models::preset::Preset,
            models::preset::CreatePresetPayload,
            models::preset::UpdatePresetPayload,
            models::preset::CodeCategory,
            models::preset::CodeEntry,
            models::preset::CodeCatalog,
            models::preset::CodeCatalogs,

            // --- Estornos e balcão ---
            models::chargeback::Chargeback,
            models::chargeback::ChargebackView,
            models::chargeback::CreateChargebackPayload,
            models::chargeback::UpdateChargebackPayload,
            models::counter::CounterBudget,
            models::counter::CounterBudgetView,
            models::counter::CreateCounterBudgetPayload,
            models::counter::CounterGoalProgress,

            // --- Checklists ---
            models::checklist::ChecklistFieldKind,
            models::checklist::ChecklistField,
            models::checklist::ChecklistTemplate,
            models::checklist::ChecklistFileLink,
            handlers::checklists::ChecklistUploadForm,

            // --- Dashboard ---
            models::dashboard::Period,
            models::dashboard::TechnicianPerformance,
            models::dashboard::DashboardSummary,
            models::service_order::ServiceOrder,

            // --- Settings ---
            models::settings::CounterGoal,
            models::settings::VisitAnnouncement,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro, login e sessão"),
        (name = "Technicians", description = "Técnicos e metas"),
        (name = "Drivers", description = "Motoristas"),
        (name = "Presets", description = "Presets de atendimento e catálogos de códigos"),
        (name = "Chargebacks", description = "Estornos lançados contra técnicos"),
        (name = "Checklists", description = "Modelos de checklist em PDF"),
        (name = "Users", description = "Perfis e papéis"),
        (name = "Counter", description = "Portal do técnico de balcão"),
        (name = "Dashboard", description = "Indicadores e ordens de serviço"),
        (name = "Settings", description = "Meta do balcão e textos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
