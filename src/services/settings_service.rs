// src/services/settings_service.rs

use crate::{
    common::error::AppError,
    db::{CounterGoalRepository, VisitAnnouncementRepository},
    models::settings::{CounterGoal, VisitAnnouncement, COUNTER_GOAL_ID, VISIT_ANNOUNCEMENT_ID},
};

// Documentos únicos de configuração. Ausente = valor padrão.
#[derive(Clone)]
pub struct SettingsService {
    counter_goal: CounterGoalRepository,
    visit_announcement: VisitAnnouncementRepository,
}

impl SettingsService {
    pub fn new(
        counter_goal: CounterGoalRepository,
        visit_announcement: VisitAnnouncementRepository,
    ) -> Self {
        Self {
            counter_goal,
            visit_announcement,
        }
    }

    pub async fn counter_goal(&self) -> Result<CounterGoal, AppError> {
        Ok(self
            .counter_goal
            .find(COUNTER_GOAL_ID)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_counter_goal(&self, goal: &CounterGoal) -> Result<CounterGoal, AppError> {
        let saved = self.counter_goal.put(COUNTER_GOAL_ID, goal).await?;
        tracing::info!("🎯 Meta do balcão definida em {}", saved.value);
        Ok(saved)
    }

    pub async fn visit_announcement(&self) -> Result<VisitAnnouncement, AppError> {
        Ok(self
            .visit_announcement
            .find(VISIT_ANNOUNCEMENT_ID)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_visit_announcement(
        &self,
        announcement: &VisitAnnouncement,
    ) -> Result<VisitAnnouncement, AppError> {
        self.visit_announcement
            .put(VISIT_ANNOUNCEMENT_ID, announcement)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DocumentStore, MemoryDocumentStore, Repository};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service() -> SettingsService {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        SettingsService::new(Repository::new(store.clone()), Repository::new(store))
    }

    #[tokio::test]
    async fn absent_documents_read_as_defaults() {
        let service = service();
        assert_eq!(service.counter_goal().await.unwrap().value, Decimal::ZERO);
        assert_eq!(service.visit_announcement().await.unwrap().text, "");
    }

    #[tokio::test]
    async fn put_overwrites_the_single_document() {
        let service = service();
        service
            .set_counter_goal(&CounterGoal { value: dec!(1000) })
            .await
            .unwrap();
        service
            .set_counter_goal(&CounterGoal { value: dec!(15000) })
            .await
            .unwrap();
        assert_eq!(service.counter_goal().await.unwrap().value, dec!(15000));
    }
}
