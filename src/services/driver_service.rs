// src/services/driver_service.rs

use crate::{
    common::error::AppError,
    db::DriverRepository,
    models::driver::{CreateDriverPayload, Driver, UpdateDriverPayload},
};

#[derive(Clone)]
pub struct DriverService {
    repo: DriverRepository,
}

impl DriverService {
    pub fn new(repo: DriverRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Driver>, AppError> {
        let mut drivers = self.repo.list().await?;
        drivers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(drivers)
    }

    pub async fn create(&self, payload: &CreateDriverPayload) -> Result<Driver, AppError> {
        self.repo
            .create(&CreateDriverPayload {
                name: payload.name.trim().to_string(),
                phone: payload.phone.trim().to_string(),
            })
            .await
    }

    pub async fn update(&self, id: &str, payload: &UpdateDriverPayload) -> Result<Driver, AppError> {
        self.repo.update(id, payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.get(id).await?;
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryDocumentStore, Repository};
    use std::sync::Arc;

    #[tokio::test]
    async fn crud_round() {
        let service = DriverService::new(Repository::new(Arc::new(MemoryDocumentStore::new())));

        let driver = service
            .create(&CreateDriverPayload {
                name: "  José ".into(),
                phone: "(11) 98888-7777".into(),
            })
            .await
            .unwrap();
        assert_eq!(driver.name, "José");

        let updated = service
            .update(
                &driver.id,
                &UpdateDriverPayload {
                    name: None,
                    phone: Some("(11) 90000-0000".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "José");
        assert_eq!(updated.phone, "(11) 90000-0000");

        service.delete(&driver.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
