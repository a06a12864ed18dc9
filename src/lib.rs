pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod scanner;
pub mod services;
pub mod storage;

pub use config::{AppConfig, AppState};
pub use router::app;
