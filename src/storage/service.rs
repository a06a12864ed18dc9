//! Operações de upload, resolução de URL e remoção.

use std::time::Duration;

use opendal::{services, ErrorKind, Operator};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

#[derive(Clone)]
pub struct StorageService {
    operator: Operator,
    public_base_url: Option<String>,
    presign_ttl: Duration,
}

impl StorageService {
    /// Falha quando o provedor não assina URLs e não há `public_base_url`:
    /// sem um dos dois, nenhum arquivo enviado teria endereço de leitura.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        if config.public_base_url.is_none() && !operator.info().full_capability().presign_read {
            return Err(StorageError::configuration(format!(
                "o provedor '{}' não gera URLs assinadas; defina STORAGE_PUBLIC_URL",
                operator.info().scheme()
            )));
        }
        Ok(Self {
            operator,
            public_base_url: config.public_base_url,
            presign_ttl: Duration::from_secs(config.presign_ttl_secs),
        })
    }

    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| StorageError::configuration("caminho inválido"))?;
                Operator::new(services::Fs::default().root(root))
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
        };
        Ok(operator)
    }

    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        // fs e memória não guardam content-type
        if self.operator.info().full_capability().write_with_content_type {
            self.operator
                .write_with(path, bytes)
                .content_type(content_type)
                .await?;
        } else {
            self.operator.write(path, bytes).await?;
        }
        tracing::info!("📤 Arquivo enviado para '{}'", path);
        Ok(())
    }

    /// URL de leitura: prefixo público quando configurado, senão pré-assinada.
    pub async fn url(&self, path: &str) -> Result<String, StorageError> {
        if let Some(base) = &self.public_base_url {
            return Ok(format!("{}/{}", base.trim_end_matches('/'), path));
        }
        if !self.operator.info().full_capability().presign_read {
            return Err(StorageError::PresignNotSupported);
        }
        let presigned = self.operator.presign_read(path, self.presign_ttl).await?;
        Ok(presigned.uri().to_string())
    }

    pub async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        match self.operator.stat(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove o objeto. Diferente do `delete` do OpenDAL (idempotente),
    /// reporta `NotFound` quando o objeto já não existe, para o chamador
    /// decidir se isso é aceitável.
    pub async fn delete(&self, path: &str) -> Result<(), StorageError> {
        if !self.exists(path).await? {
            return Err(StorageError::not_found(path));
        }
        self.operator.delete(path).await?;
        tracing::info!("🗑️ Arquivo removido de '{}'", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_storage() -> StorageService {
        StorageService::from_config(
            StorageConfig::new(StorageProvider::Memory).with_public_base_url("https://files.test/"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upload_then_delete() {
        let storage = memory_storage();
        storage
            .upload("checklists/abc.pdf", b"%PDF-1.4".to_vec(), "application/pdf")
            .await
            .unwrap();
        assert!(storage.exists("checklists/abc.pdf").await.unwrap());

        storage.delete("checklists/abc.pdf").await.unwrap();
        assert!(!storage.exists("checklists/abc.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn deleting_absent_object_reports_not_found() {
        let err = memory_storage().delete("checklists/ghost.pdf").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn provider_without_presign_requires_public_url() {
        let provider = StorageProvider::LocalFs {
            root: std::env::temp_dir().join("backoffice-storage-config"),
        };

        let err = StorageService::from_config(StorageConfig::new(provider.clone()))
            .err()
            .unwrap();
        assert!(matches!(err, StorageError::Configuration(_)));

        assert!(
            StorageService::from_config(
                StorageConfig::new(provider).with_public_base_url("http://localhost:3000/files")
            )
            .is_ok()
        );
    }

    #[tokio::test]
    async fn local_fs_with_public_url_resolves_links() {
        let root = std::env::temp_dir().join(format!(
            "backoffice-storage-{}",
            uuid::Uuid::new_v4().simple()
        ));
        let storage = StorageService::from_config(
            StorageConfig::new(StorageProvider::LocalFs { root: root.clone() })
                .with_public_base_url("http://localhost:3000/files"),
        )
        .unwrap();

        storage
            .upload("checklists/abc.pdf", b"%PDF-1.4".to_vec(), "application/pdf")
            .await
            .unwrap();
        assert_eq!(
            storage.url("checklists/abc.pdf").await.unwrap(),
            "http://localhost:3000/files/checklists/abc.pdf"
        );

        storage.delete("checklists/abc.pdf").await.unwrap();
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn public_url_joins_base_and_path() {
        let url = memory_storage().url("checklists/abc.pdf").await.unwrap();
        assert_eq!(url, "https://files.test/checklists/abc.pdf");
    }
}
