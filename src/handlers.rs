pub mod auth;
pub mod chargebacks;
pub mod checklists;
pub mod counter;
pub mod dashboard;
pub mod drivers;
pub mod presets;
pub mod settings;
pub mod technicians;
pub mod users;
