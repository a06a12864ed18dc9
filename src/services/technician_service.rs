// src/services/technician_service.rs

use futures::future::join_all;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use crate::{
    common::error::AppError,
    db::TechnicianRepository,
    models::technician::{
        CreateTechnicianPayload, SetGoalPayload, Technician, UpdateTechnicianPayload,
    },
};

const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Divide a meta global em `count` cotas, em centavos.
///
/// Cada cota é `global / count` truncada em centavos; os centavos que sobram
/// vão, um a um, para as primeiras posições. A soma das cotas é exatamente a
/// meta global (arredondada em centavos).
pub fn split_goal(global_goal: Decimal, count: usize) -> Vec<Decimal> {
    if count == 0 {
        return Vec::new();
    }
    let total = global_goal.round_dp(2);
    let divisor = Decimal::from(count);
    let base = (total / divisor).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let remainder_cents = ((total - base * divisor) / CENT)
        .to_usize()
        .unwrap_or(0);

    (0..count)
        .map(|i| if i < remainder_cents { base + CENT } else { base })
        .collect()
}

#[derive(Clone)]
pub struct TechnicianService {
    repo: TechnicianRepository,
}

impl TechnicianService {
    pub fn new(repo: TechnicianRepository) -> Self {
        Self { repo }
    }

    // Ordenados por nome
    pub async fn list(&self) -> Result<Vec<Technician>, AppError> {
        let mut technicians = self.repo.list().await?;
        technicians.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(technicians)
    }

    pub async fn create(&self, payload: &CreateTechnicianPayload) -> Result<Technician, AppError> {
        let payload = CreateTechnicianPayload {
            name: payload.name.trim().to_string(),
            goal: payload.goal,
        };
        let technician = self.repo.create(&payload).await?;
        tracing::info!("🔧 Técnico {} criado", technician.id);
        Ok(technician)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &UpdateTechnicianPayload,
    ) -> Result<Technician, AppError> {
        let payload = UpdateTechnicianPayload {
            name: payload.name.as_ref().map(|n| n.trim().to_string()),
            goal: payload.goal,
        };
        self.repo.update(id, &payload).await
    }

    pub async fn set_goal(&self, id: &str, goal: Decimal) -> Result<Technician, AppError> {
        if goal.is_sign_negative() {
            return Err(AppError::InvalidGoal);
        }
        self.repo.update(id, &SetGoalPayload { goal }).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.get(id).await?;
        self.repo.delete(id).await?;
        tracing::info!("🗑️ Técnico {} removido", id);
        Ok(())
    }

    /// Distribui a meta global igualmente entre todos os técnicos.
    ///
    /// As gravações rodam em paralelo; a lista atualizada só é devolvida se
    /// todas derem certo. Se alguma falhar, o erro é devolvido e as demais
    /// gravações não são desfeitas.
    pub async fn distribute_goal(&self, global_goal: Decimal) -> Result<Vec<Technician>, AppError> {
        if global_goal <= Decimal::ZERO {
            return Err(AppError::InvalidGoal);
        }

        let technicians = self.list().await?;
        if technicians.is_empty() {
            return Err(AppError::NoTechnicians);
        }

        let shares = split_goal(global_goal, technicians.len());
        let repo = &self.repo;
        let writes = technicians.iter().zip(shares).map(|(technician, goal)| async move {
            repo.update(&technician.id, &SetGoalPayload { goal }).await
        });

        let updated = join_all(writes)
            .await
            .into_iter()
            .collect::<Result<Vec<Technician>, AppError>>()?;

        tracing::info!(
            "🎯 Meta de {} distribuída entre {} técnicos",
            global_goal,
            updated.len()
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{testing::ScriptedStore, MemoryDocumentStore, Repository, StoreError};
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service() -> TechnicianService {
        TechnicianService::new(Repository::new(Arc::new(MemoryDocumentStore::new())))
    }

    async fn seed(service: &TechnicianService, names: &[&str]) {
        for name in names {
            service
                .create(&CreateTechnicianPayload {
                    name: name.to_string(),
                    goal: Decimal::ZERO,
                })
                .await
                .unwrap();
        }
    }

    #[rstest]
    #[case(dec!(20000), 4, vec![dec!(5000), dec!(5000), dec!(5000), dec!(5000)])]
    #[case(dec!(100), 3, vec![dec!(33.34), dec!(33.33), dec!(33.33)])]
    #[case(dec!(0.05), 3, vec![dec!(0.02), dec!(0.02), dec!(0.01)])]
    #[case(dec!(1000), 1, vec![dec!(1000)])]
    fn split_goal_cases(#[case] global: Decimal, #[case] count: usize, #[case] expected: Vec<Decimal>) {
        assert_eq!(split_goal(global, count), expected);
    }

    proptest! {
        #[test]
        fn shares_sum_to_global_and_differ_by_at_most_a_cent(
            cents in 1i64..100_000_000,
            count in 1usize..50,
        ) {
            let global = Decimal::new(cents, 2);
            let shares = split_goal(global, count);

            prop_assert_eq!(shares.len(), count);
            prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), global);

            let max = shares.iter().max().copied().unwrap();
            let min = shares.iter().min().copied().unwrap();
            prop_assert!(max - min <= CENT);
        }
    }

    #[tokio::test]
    async fn distribute_goal_updates_every_technician() {
        let service = service();
        seed(&service, &["Ana", "Bruno", "Carla", "Diego"]).await;

        let updated = service.distribute_goal(dec!(20000)).await.unwrap();

        assert_eq!(updated.len(), 4);
        assert!(updated.iter().all(|t| t.goal == dec!(5000)));
        let stored = service.list().await.unwrap();
        assert_eq!(stored.iter().map(|t| t.goal).sum::<Decimal>(), dec!(20000));
    }

    #[tokio::test]
    async fn distribute_goal_requires_technicians_and_positive_goal() {
        let service = service();
        assert!(matches!(
            service.distribute_goal(dec!(1000)).await,
            Err(AppError::NoTechnicians)
        ));

        seed(&service, &["Ana"]).await;
        assert!(matches!(
            service.distribute_goal(Decimal::ZERO).await,
            Err(AppError::InvalidGoal)
        ));
    }

    #[tokio::test]
    async fn distribute_goal_fails_when_any_write_fails() {
        let store = Arc::new(ScriptedStore::new());
        let service = TechnicianService::new(Repository::new(store.clone()));
        seed(&service, &["Ana", "Bruno", "Carla"]).await;
        let bruno = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|t| t.name == "Bruno")
            .unwrap();
        store.fail_merges_for(&bruno.id);

        let result = service.distribute_goal(dec!(3000)).await;

        assert!(matches!(result, Err(AppError::Store(StoreError::Backend(_)))));
        // Sem rollback: a gravação que falhou mantém a meta antiga
        let stored = service.list().await.unwrap();
        let bruno = stored.iter().find(|t| t.id == bruno.id).unwrap();
        assert_eq!(bruno.goal, Decimal::ZERO);
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let service = service();
        seed(&service, &["zé", "Ana", "bruno"]).await;
        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Ana", "bruno", "zé"]);
    }

    #[tokio::test]
    async fn deleting_unknown_technician_is_not_found() {
        assert!(service().delete("ghost").await.is_err());
    }
}
