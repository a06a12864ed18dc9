//! Object storage dos arquivos (PDFs de checklist) via Apache OpenDAL.
//!
//! Provedores: S3-compatível, sistema de arquivos local e memória (testes).

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::StorageService;
