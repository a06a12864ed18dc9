//! Configuração do provedor de storage.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// S3-compatível: AWS S3, Cloudflare R2, MinIO, Supabase
    S3 {
        endpoint: String,
        bucket: String,
        access_key_id: String,
        secret_access_key: String,
        region: String,
    },
    /// Sistema de arquivos local (desenvolvimento)
    LocalFs { root: PathBuf },
    /// Em memória (testes)
    Memory,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    /// Prefixo público dos arquivos. Sem ele, as URLs são pré-assinadas.
    pub public_base_url: Option<String>,
    /// Validade das URLs pré-assinadas, em segundos.
    pub presign_ttl_secs: u64,
}

impl StorageConfig {
    /// 1 hora
    pub const DEFAULT_PRESIGN_TTL: u64 = 3600;

    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            public_base_url: None,
            presign_ttl_secs: Self::DEFAULT_PRESIGN_TTL,
        }
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }
}
