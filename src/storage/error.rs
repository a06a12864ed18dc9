//! Erros do object storage.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// O objeto não existe (já apagado, ou nunca enviado).
    #[error("arquivo não encontrado: {key}")]
    NotFound { key: String },

    #[error("o provedor não gera URLs assinadas e nenhuma URL pública foi configurada")]
    PresignNotSupported,

    #[error("configuração de storage inválida: {0}")]
    Configuration(String),

    #[error("falha na operação de storage: {0}")]
    Operation(String),
}

impl StorageError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::Unsupported => Self::PresignNotSupported,
            _ => Self::Operation(err.to_string()),
        }
    }
}
