// src/services/chargeback_service.rs

use std::collections::HashMap;

use crate::{
    common::error::AppError,
    db::{ChargebackRepository, TechnicianRepository},
    models::chargeback::{
        Chargeback, ChargebackView, CreateChargebackPayload, UpdateChargebackPayload,
    },
};

#[derive(Clone)]
pub struct ChargebackService {
    chargebacks: ChargebackRepository,
    technicians: TechnicianRepository,
}

impl ChargebackService {
    pub fn new(chargebacks: ChargebackRepository, technicians: TechnicianRepository) -> Self {
        Self {
            chargebacks,
            technicians,
        }
    }

    // Join em tempo de leitura: id -> nome do técnico
    async fn technician_names(&self) -> Result<HashMap<String, String>, AppError> {
        Ok(self
            .technicians
            .list()
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect())
    }

    fn view(chargeback: Chargeback, names: &HashMap<String, String>) -> ChargebackView {
        let technician_name = names.get(&chargeback.technician_id).cloned();
        ChargebackView {
            chargeback,
            technician_name,
        }
    }

    async fn single_view(&self, chargeback: Chargeback) -> Result<ChargebackView, AppError> {
        let technician_name = self
            .technicians
            .find(&chargeback.technician_id)
            .await?
            .map(|t| t.name);
        Ok(ChargebackView {
            chargeback,
            technician_name,
        })
    }

    /// Estornos com o nome do técnico, do mais recente para o mais antigo.
    pub async fn list(&self) -> Result<Vec<ChargebackView>, AppError> {
        let names = self.technician_names().await?;
        let mut chargebacks = self.chargebacks.list().await?;
        chargebacks.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(chargebacks
            .into_iter()
            .map(|c| Self::view(c, &names))
            .collect())
    }

    async fn ensure_technician(&self, technician_id: &str) -> Result<(), AppError> {
        match self.technicians.find(technician_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("technician")),
        }
    }

    pub async fn create(&self, payload: &CreateChargebackPayload) -> Result<ChargebackView, AppError> {
        self.ensure_technician(&payload.technician_id).await?;
        let chargeback = self.chargebacks.create(payload).await?;
        tracing::info!(
            "💸 Estorno {} lançado para o técnico {}",
            chargeback.id,
            chargeback.technician_id
        );
        self.single_view(chargeback).await
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &UpdateChargebackPayload,
    ) -> Result<ChargebackView, AppError> {
        if let Some(technician_id) = &payload.technician_id {
            self.ensure_technician(technician_id).await?;
        }
        let chargeback = self.chargebacks.update(id, payload).await?;
        self.single_view(chargeback).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.chargebacks.get(id).await?;
        self.chargebacks.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{DocumentStore, MemoryDocumentStore, Repository},
        models::technician::{CreateTechnicianPayload, Technician, UpdateTechnicianPayload},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    struct Fixture {
        service: ChargebackService,
        technicians: TechnicianRepository,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let technicians: TechnicianRepository = Repository::new(store.clone());
        Fixture {
            service: ChargebackService::new(Repository::new(store), technicians.clone()),
            technicians,
        }
    }

    fn payload(technician_id: &str, day: u32) -> CreateChargebackPayload {
        CreateChargebackPayload {
            technician_id: technician_id.into(),
            service_order_number: "4172839465".into(),
            value: dec!(150),
            reason: "Peça com defeito".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
        }
    }

    async fn technician(repo: &TechnicianRepository, name: &str) -> Technician {
        repo.create(&CreateTechnicianPayload {
            name: name.into(),
            goal: Decimal::ZERO,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn list_joins_current_name_and_sorts_by_date_desc() {
        let f = fixture();
        let carlos = technician(&f.technicians, "Carlos").await;
        f.service.create(&payload(&carlos.id, 3)).await.unwrap();
        f.service.create(&payload(&carlos.id, 17)).await.unwrap();

        // renomear o técnico reflete na próxima leitura
        f.technicians
            .update(
                &carlos.id,
                &UpdateTechnicianPayload {
                    name: Some("Carlos Lima".into()),
                    goal: None,
                },
            )
            .await
            .unwrap();

        let list = f.service.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].chargeback.date.to_string(), "2026-10-17");
        assert!(list.iter().all(|c| c.technician_name.as_deref() == Some("Carlos Lima")));
    }

    #[tokio::test]
    async fn unknown_technician_is_rejected() {
        let f = fixture();
        let err = f.service.create(&payload("ghost", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("technician")));
    }

    #[tokio::test]
    async fn deleted_technician_leaves_name_empty() {
        let f = fixture();
        let ana = technician(&f.technicians, "Ana").await;
        f.service.create(&payload(&ana.id, 5)).await.unwrap();
        f.technicians.delete(&ana.id).await.unwrap();

        let list = f.service.list().await.unwrap();
        assert_eq!(list[0].technician_name, None);
    }
}
