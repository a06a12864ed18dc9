pub mod auth;
pub mod chargeback;
pub mod checklist;
pub mod counter;
pub mod dashboard;
pub mod driver;
pub mod preset;
pub mod service_order;
pub mod settings;
pub mod technician;
