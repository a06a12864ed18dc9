pub mod auth;
pub mod session;
pub mod technician_service;
pub use technician_service::TechnicianService;
pub mod driver_service;
pub use driver_service::DriverService;
pub mod preset_service;
pub use preset_service::PresetService;
pub mod chargeback_service;
pub use chargeback_service::ChargebackService;
pub mod checklist_service;
pub use checklist_service::ChecklistService;
pub mod user_service;
pub use user_service::UserService;
pub mod counter_service;
pub use counter_service::CounterService;
pub mod settings_service;
pub use settings_service::SettingsService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
