// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{DocumentStore, MemoryDocumentStore, PgDocumentStore, Repository},
    services::{
        auth::AuthService, ChargebackService, ChecklistService, CounterService, DashboardService,
        DriverService, PresetService, SettingsService, TechnicianService, UserService,
    },
    storage::{StorageConfig, StorageProvider, StorageService},
};

#[derive(Debug, Clone)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub store: StoreBackend,
    pub storage: StorageConfig,
    pub jwt_secret: String,
    pub session_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub timezone: Tz,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{} deve ser definida", key))
}

impl AppConfig {
    pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

    /// Lê a configuração do ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let store = match var_or("STORE_BACKEND", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: required("DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("STORE_BACKEND desconhecido: {}", other),
        };

        let provider = match var_or("STORAGE_PROVIDER", "fs").as_str() {
            "fs" => StorageProvider::LocalFs {
                root: PathBuf::from(var_or("STORAGE_ROOT", "./data/storage")),
            },
            "s3" => StorageProvider::S3 {
                endpoint: required("S3_ENDPOINT")?,
                bucket: required("S3_BUCKET")?,
                access_key_id: required("S3_ACCESS_KEY_ID")?,
                secret_access_key: required("S3_SECRET_ACCESS_KEY")?,
                region: var_or("S3_REGION", "auto"),
            },
            "memory" => StorageProvider::Memory,
            other => anyhow::bail!("STORAGE_PROVIDER desconhecido: {}", other),
        };
        let mut storage = StorageConfig::new(provider);
        if let Ok(url) = env::var("STORAGE_PUBLIC_URL") {
            storage = storage.with_public_base_url(url);
        }
        // Só o S3 assina URLs de leitura
        if storage.public_base_url.is_none() && !matches!(storage.provider, StorageProvider::S3 { .. }) {
            anyhow::bail!("STORAGE_PUBLIC_URL é obrigatório com STORAGE_PROVIDER=fs ou memory");
        }

        let ttl_days: i64 = var_or("SESSION_TTL_DAYS", "7")
            .parse()
            .context("SESSION_TTL_DAYS deve ser um número inteiro")?;
        let bcrypt_cost: u32 = match env::var("BCRYPT_COST") {
            Ok(raw) => raw.parse().context("BCRYPT_COST deve ser um número inteiro")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let raw_tz = var_or("TIMEZONE", Self::DEFAULT_TIMEZONE.name());
        let timezone: Tz = raw_tz
            .parse()
            .map_err(|e| anyhow::anyhow!("TIMEZONE inválido '{}': {:?}", raw_tz, e))?;

        Ok(Self {
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            store,
            storage,
            jwt_secret: required("JWT_SECRET")?,
            session_ttl: chrono::Duration::days(ttl_days),
            bcrypt_cost,
            timezone,
        })
    }

    /// Tudo em memória: testes e demonstração local.
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            store: StoreBackend::Memory,
            storage: StorageConfig::new(StorageProvider::Memory)
                .with_public_base_url("http://localhost/files"),
            jwt_secret: jwt_secret.into(),
            session_ttl: chrono::Duration::days(7),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            timezone: Self::DEFAULT_TIMEZONE,
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub technician_service: TechnicianService,
    pub driver_service: DriverService,
    pub preset_service: PresetService,
    pub chargeback_service: ChargebackService,
    pub checklist_service: ChecklistService,
    pub user_service: UserService,
    pub counter_service: CounterService,
    pub settings_service: SettingsService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match &config.store {
            StoreBackend::Postgres { database_url } => {
                // Conecta ao banco de dados, usando '?' para propagar erros
                let db_pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&db_pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgDocumentStore::connect(db_pool).await?)
            }
            StoreBackend::Memory => {
                tracing::warn!("Document store em memória: os dados somem ao reiniciar");
                Arc::new(MemoryDocumentStore::new())
            }
        };

        let storage = StorageService::from_config(config.storage.clone())?;
        Ok(Self::assemble(store, storage, config))
    }

    // --- Monta o grafo de dependências ---
    pub fn assemble(
        store: Arc<dyn DocumentStore>,
        storage: StorageService,
        config: &AppConfig,
    ) -> Self {
        let auth_service = AuthService::new(
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            config.jwt_secret.clone(),
            config.session_ttl,
        )
        .with_hash_cost(config.bcrypt_cost);

        Self {
            i18n_store: Arc::new(I18nStore::default()),
            technician_service: TechnicianService::new(Repository::new(store.clone())),
            driver_service: DriverService::new(Repository::new(store.clone())),
            preset_service: PresetService::new(
                Repository::new(store.clone()),
                Repository::new(store.clone()),
            ),
            chargeback_service: ChargebackService::new(
                Repository::new(store.clone()),
                Repository::new(store.clone()),
            ),
            checklist_service: ChecklistService::new(Repository::new(store.clone()), storage),
            user_service: UserService::new(Repository::new(store.clone()), auth_service.clone()),
            counter_service: CounterService::new(
                Repository::new(store.clone()),
                Repository::new(store.clone()),
                Repository::new(store.clone()),
                config.timezone,
            ),
            settings_service: SettingsService::new(
                Repository::new(store.clone()),
                Repository::new(store.clone()),
            ),
            dashboard_service: DashboardService::new(
                Repository::new(store.clone()),
                Repository::new(store.clone()),
                config.timezone,
            ),
            auth_service,
            store,
        }
    }
}
