// src/services/dashboard_service.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{ServiceOrderRepository, TechnicianRepository},
    models::{
        dashboard::{DashboardSummary, Period, TechnicianPerformance},
        service_order::ServiceOrder,
        technician::Technician,
    },
};

/// Intervalo semiaberto `[start, end)` em UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodWindow {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

/// Primeiro dia do mês de `date` e primeiro dia do mês seguinte.
pub fn month_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = date
        .with_day(1)
        .ok_or_else(|| AppError::InvalidPeriod(date.to_string()))?;
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let next = next.ok_or_else(|| AppError::InvalidPeriod(date.to_string()))?;
    Ok((start, next))
}

// Meia-noite local em UTC. Onde a meia-noite cai num buraco de horário de
// verão, usa a 01:00.
fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Janela do período no fuso `tz`, relativa a `now`. `None` para `AllTime`.
///
/// A semana começa na segunda-feira e é recortada pelo mês corrente, de modo
/// que hoje ⊆ semana ⊆ mês ⊆ ano.
pub fn period_window(
    period: Period,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<Option<PeriodWindow>, AppError> {
    let today = now.with_timezone(tz).date_naive();
    let (month_start, next_month) = month_bounds(today)?;
    let invalid = || AppError::InvalidPeriod(format!("{:?}", period));

    let (start, end) = match period {
        Period::AllTime => return Ok(None),
        Period::Today => (today, today.succ_opt().ok_or_else(invalid)?),
        Period::ThisWeek => {
            let monday =
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
            let next_monday = monday + Duration::days(7);
            (monday.max(month_start), next_monday.min(next_month))
        }
        Period::ThisMonth => (month_start, next_month),
        Period::ThisYear => (
            NaiveDate::from_ymd_opt(today.year(), 1, 1).ok_or_else(invalid)?,
            NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).ok_or_else(invalid)?,
        ),
    };

    Ok(Some(PeriodWindow {
        start: local_midnight(tz, start),
        end: local_midnight(tz, end),
    }))
}

/// Percentual da meta atingido, limitado a 100 e arredondado em 2 casas.
/// Meta zero (ou negativa) dá 0.
pub fn goal_progress(revenue: Decimal, goal: Decimal) -> Decimal {
    if goal <= Decimal::ZERO || revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let ratio = (revenue / goal).min(Decimal::ONE);
    (ratio * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Agrega as OS da janela. OS de técnicos desconhecidos entram nos totais,
/// mas não na tabela por técnico.
pub fn summarize(
    period: Period,
    window: Option<&PeriodWindow>,
    orders: &[ServiceOrder],
    technicians: &[Technician],
) -> DashboardSummary {
    let filtered: Vec<&ServiceOrder> = orders
        .iter()
        .filter(|os| window.map_or(true, |w| w.contains(&os.date)))
        .collect();

    let mut total_revenue = Decimal::ZERO;
    let mut per_technician: HashMap<&str, (usize, Decimal)> = HashMap::new();
    let mut by_equipment_type = BTreeMap::new();
    let mut by_service_type = BTreeMap::new();

    for os in &filtered {
        let revenue = os.approved_budget_value().unwrap_or(Decimal::ZERO);
        total_revenue += revenue;

        let entry = per_technician
            .entry(os.technician_id.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += revenue;

        *by_equipment_type.entry(os.equipment_type.clone()).or_insert(0) += 1;
        *by_service_type.entry(os.service_type.clone()).or_insert(0) += 1;
    }

    let mut performance: Vec<TechnicianPerformance> = technicians
        .iter()
        .map(|t| {
            let (order_count, revenue) = per_technician
                .get(t.id.as_str())
                .copied()
                .unwrap_or((0, Decimal::ZERO));
            TechnicianPerformance {
                technician_id: t.id.clone(),
                name: t.name.clone(),
                goal: t.goal,
                order_count,
                revenue,
                progress_percent: goal_progress(revenue, t.goal),
            }
        })
        .collect();
    performance.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    DashboardSummary {
        period,
        total_os_filtered: filtered.len(),
        total_revenue,
        technicians: performance,
        by_equipment_type,
        by_service_type,
    }
}

#[derive(Clone)]
pub struct DashboardService {
    orders: ServiceOrderRepository,
    technicians: TechnicianRepository,
    timezone: Tz,
}

impl DashboardService {
    pub fn new(orders: ServiceOrderRepository, technicians: TechnicianRepository, timezone: Tz) -> Self {
        Self {
            orders,
            technicians,
            timezone,
        }
    }

    pub async fn summary(&self, period: Period) -> Result<DashboardSummary, AppError> {
        self.summary_at(period, Utc::now()).await
    }

    pub async fn summary_at(
        &self,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary, AppError> {
        let window = period_window(period, now, &self.timezone)?;
        let (orders, technicians) =
            futures::try_join!(self.orders.list(), self.technicians.list())?;
        Ok(summarize(period, window.as_ref(), &orders, &technicians))
    }

    /// OS do período, da mais recente para a mais antiga.
    pub async fn list_orders(&self, period: Period) -> Result<Vec<ServiceOrder>, AppError> {
        let window = period_window(period, Utc::now(), &self.timezone)?;
        let mut orders: Vec<ServiceOrder> = self
            .orders
            .list()
            .await?
            .into_iter()
            .filter(|os| window.as_ref().map_or(true, |w| w.contains(&os.date)))
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }
}
