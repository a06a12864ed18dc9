// src/services/counter_service.rs

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{CounterBudgetRepository, CounterGoalRepository, UserRepository},
    models::{
        counter::{
            CounterBudget, CounterBudgetView, CounterGoalProgress, CreateCounterBudgetPayload,
            NewCounterBudget,
        },
        settings::COUNTER_GOAL_ID,
    },
    services::dashboard_service::{goal_progress, month_bounds},
};

#[derive(Clone)]
pub struct CounterService {
    budgets: CounterBudgetRepository,
    users: UserRepository,
    goals: CounterGoalRepository,
    timezone: Tz,
}

impl CounterService {
    pub fn new(
        budgets: CounterBudgetRepository,
        users: UserRepository,
        goals: CounterGoalRepository,
        timezone: Tz,
    ) -> Self {
        Self {
            budgets,
            users,
            goals,
            timezone,
        }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    async fn views(
        &self,
        filter: impl Fn(&CounterBudget) -> bool,
    ) -> Result<Vec<CounterBudgetView>, AppError> {
        let names: HashMap<String, String> = self
            .users
            .list()
            .await?
            .into_iter()
            .map(|u| (u.uid, u.name))
            .collect();

        let mut budgets: Vec<CounterBudget> = self
            .budgets
            .list()
            .await?
            .into_iter()
            .filter(|b| filter(b))
            .collect();
        budgets.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(budgets
            .into_iter()
            .map(|budget| CounterBudgetView {
                technician_name: names.get(&budget.technician_id).cloned(),
                budget,
            })
            .collect())
    }

    /// Todos os orçamentos do balcão (visão do administrador).
    pub async fn list_all(&self) -> Result<Vec<CounterBudgetView>, AppError> {
        self.views(|_| true).await
    }

    pub async fn list_own(&self, uid: &str) -> Result<Vec<CounterBudgetView>, AppError> {
        self.views(|b| b.technician_id == uid).await
    }

    pub async fn create(
        &self,
        uid: &str,
        payload: &CreateCounterBudgetPayload,
    ) -> Result<CounterBudgetView, AppError> {
        let budget = self
            .budgets
            .create(&NewCounterBudget {
                technician_id: uid.to_string(),
                service_order_number: payload.service_order_number.trim().to_string(),
                value: payload.value,
                date: payload.date.unwrap_or_else(|| self.today()),
                observations: payload
                    .observations
                    .as_ref()
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty()),
            })
            .await?;
        tracing::info!("🧾 Orçamento {} lançado pelo balcão ({})", budget.id, uid);

        let technician_name = self.users.find(uid).await?.map(|u| u.name);
        Ok(CounterBudgetView {
            budget,
            technician_name,
        })
    }

    /// Soma do mês corrente dos orçamentos do técnico contra `configs/counterGoal`.
    pub async fn goal_progress(&self, uid: &str) -> Result<CounterGoalProgress, AppError> {
        self.goal_progress_on(uid, self.today()).await
    }

    pub async fn goal_progress_on(
        &self,
        uid: &str,
        today: NaiveDate,
    ) -> Result<CounterGoalProgress, AppError> {
        let (month_start, next_month) = month_bounds(today)?;
        let goal = self
            .goals
            .find(COUNTER_GOAL_ID)
            .await?
            .map(|g| g.value)
            .unwrap_or(Decimal::ZERO);

        let month: Vec<CounterBudget> = self
            .budgets
            .list()
            .await?
            .into_iter()
            .filter(|b| b.technician_id == uid && b.date >= month_start && b.date < next_month)
            .collect();
        let total: Decimal = month.iter().map(|b| b.value).sum();

        Ok(CounterGoalProgress {
            month: month_start.format("%Y-%m").to_string(),
            goal,
            total,
            budget_count: month.len(),
            progress_percent: goal_progress(total, goal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{DocumentStore, MemoryDocumentStore, Repository},
        models::{
            auth::{AppUser, Role},
            settings::CounterGoal,
        },
    };
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn fixture() -> (CounterService, CounterGoalRepository) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let users: UserRepository = Repository::new(store.clone());
        users
            .put(
                "balcao1",
                &AppUser {
                    uid: "balcao1".into(),
                    name: "Paula".into(),
                    email: "paula@loja.com".into(),
                    role: Role::CounterTechnician,
                },
            )
            .await
            .unwrap();
        let goals: CounterGoalRepository = Repository::new(store.clone());
        let service = CounterService::new(
            Repository::new(store),
            users,
            goals.clone(),
            chrono_tz::America::Sao_Paulo,
        );
        (service, goals)
    }

    fn payload(value: Decimal, day: &str) -> CreateCounterBudgetPayload {
        CreateCounterBudgetPayload {
            service_order_number: " 4172839465 ".into(),
            value,
            date: Some(date(day)),
            observations: Some("  ".into()),
        }
    }

    #[tokio::test]
    async fn create_takes_technician_from_session() {
        let (service, _) = fixture().await;
        let view = service
            .create("balcao1", &payload(dec!(480), "2026-10-10"))
            .await
            .unwrap();

        assert_eq!(view.budget.technician_id, "balcao1");
        assert_eq!(view.budget.service_order_number, "4172839465");
        assert_eq!(view.budget.observations, None);
        assert_eq!(view.technician_name.as_deref(), Some("Paula"));
    }

    #[tokio::test]
    async fn own_list_excludes_other_technicians() {
        let (service, _) = fixture().await;
        service.create("balcao1", &payload(dec!(100), "2026-10-01")).await.unwrap();
        service.create("balcao1", &payload(dec!(200), "2026-10-09")).await.unwrap();
        service.create("outro", &payload(dec!(300), "2026-10-05")).await.unwrap();

        let own = service.list_own("balcao1").await.unwrap();
        assert_eq!(own.len(), 2);
        assert_eq!(own[0].budget.date, date("2026-10-09"));

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all.iter().filter(|v| v.technician_name.is_none()).count(), 1);
    }

    #[tokio::test]
    async fn goal_progress_counts_current_month_only() {
        let (service, goals) = fixture().await;
        goals
            .put(COUNTER_GOAL_ID, &CounterGoal { value: dec!(1000) })
            .await
            .unwrap();
        service.create("balcao1", &payload(dec!(250), "2026-10-01")).await.unwrap();
        service.create("balcao1", &payload(dec!(150), "2026-10-31")).await.unwrap();
        service.create("balcao1", &payload(dec!(900), "2026-09-30")).await.unwrap();

        let progress = service
            .goal_progress_on("balcao1", date("2026-10-19"))
            .await
            .unwrap();

        assert_eq!(progress.month, "2026-10");
        assert_eq!(progress.total, dec!(400));
        assert_eq!(progress.budget_count, 2);
        assert_eq!(progress.progress_percent, dec!(40));
    }

    #[tokio::test]
    async fn missing_goal_reports_zero_progress() {
        let (service, _) = fixture().await;
        service.create("balcao1", &payload(dec!(250), "2026-10-01")).await.unwrap();
        let progress = service
            .goal_progress_on("balcao1", date("2026-10-19"))
            .await
            .unwrap();
        assert_eq!(progress.goal, Decimal::ZERO);
        assert_eq!(progress.progress_percent, Decimal::ZERO);
    }
}
