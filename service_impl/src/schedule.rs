use async_trait::async_trait;
use dao::TransactionDao;
use dao::day_plan::DayPlanDao;
use dao::employee_day_plan::EmployeeDayPlanDao;
use dao::tariff::TariffDao;
use dao::week_plan::WeekPlanDao;
use service::ServiceError;
use service::day_plan::DayPlan;
use service::permission::Authentication;
use service::schedule::ScheduleService;
use service::tariff::{Tariff, TariffType};
use service::week_plan::WeekPlan;
use terp_utils::{DayOfWeek, days_between};
use time::Date;
use uuid::Uuid;

use crate::gen_service_impl;

/// Picks the tariff covering `date`. Overlaps should not exist; when they
/// do, the latest `valid_from` wins, ties break on the id.
pub fn select_tariff(tariffs: &[Tariff], date: Date) -> Option<&Tariff> {
    tariffs
        .iter()
        .filter(|tariff| tariff.covers(date))
        .max_by(|a, b| a.valid_from.cmp(&b.valid_from).then(a.id.cmp(&b.id)))
}

/// Rhythm slot for a date. Days are numbered one-based from the tariff
/// start and wrap modulo the rhythm length.
pub fn rhythm_day_index(valid_from: Date, date: Date, rhythm_days: i32) -> i32 {
    let day_number = days_between(valid_from, date) + 1;
    day_number.rem_euclid(rhythm_days as i64) as i32
}

/// Day plan id the tariff assigns to `date`, `None` for an off day.
pub fn resolve_plan_id(tariff: &Tariff, week_plan: Option<&WeekPlan>, date: Date) -> Option<Uuid> {
    match tariff.tariff_type {
        TariffType::Week => week_plan?.day_plan_for(DayOfWeek::of(date)),
        TariffType::Rhythm => {
            let rhythm_days = tariff.rhythm_days?;
            if rhythm_days <= 0 {
                return None;
            }
            let index = rhythm_day_index(tariff.valid_from, date, rhythm_days);
            tariff
                .rhythm_day_plans
                .iter()
                .find(|day| day.day_index == index)
                .and_then(|day| day.day_plan_id)
        }
    }
}

gen_service_impl! {
    struct ScheduleServiceImpl: ScheduleService = ScheduleServiceDeps {
        TariffDao: dao::tariff::TariffDao<Transaction = Self::Transaction> = tariff_dao,
        WeekPlanDao: dao::week_plan::WeekPlanDao<Transaction = Self::Transaction> = week_plan_dao,
        DayPlanDao: dao::day_plan::DayPlanDao<Transaction = Self::Transaction> = day_plan_dao,
        EmployeeDayPlanDao: dao::employee_day_plan::EmployeeDayPlanDao<Transaction = Self::Transaction> = employee_day_plan_dao,
        TransactionDao: dao::TransactionDao<Transaction = Self::Transaction> = transaction_dao
    }
}

impl<Deps: ScheduleServiceDeps> ScheduleServiceImpl<Deps> {
    async fn load_day_plan(
        &self,
        day_plan_id: Uuid,
        tx: Deps::Transaction,
    ) -> Result<DayPlan, ServiceError> {
        let plan = self
            .day_plan_dao
            .find_by_id(day_plan_id, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(day_plan_id))?;
        let breaks = self.day_plan_dao.find_breaks(day_plan_id, tx.clone()).await?;
        let bonuses = self.day_plan_dao.find_bonuses(day_plan_id, tx).await?;
        Ok(DayPlan::from_entities(&plan, &breaks, &bonuses))
    }
}

#[async_trait]
impl<Deps: ScheduleServiceDeps> ScheduleService for ScheduleServiceImpl<Deps> {
    type Context = Deps::Context;
    type Transaction = Deps::Transaction;

    async fn resolve_day_plan(
        &self,
        employee_id: Uuid,
        date: Date,
        _context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Option<DayPlan>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;

        // A per-date override wins over the tariff.
        if let Some(day_plan_override) = self
            .employee_day_plan_dao
            .find_by_employee_and_date(employee_id, date, tx.clone())
            .await?
        {
            return match day_plan_override.day_plan_id {
                Some(day_plan_id) => Ok(Some(self.load_day_plan(day_plan_id, tx).await?)),
                None => Ok(None),
            };
        }

        let tariff_entities = self.tariff_dao.find_by_employee_id(employee_id, tx.clone()).await?;
        let mut tariffs = Vec::with_capacity(tariff_entities.len());
        for entity in tariff_entities.iter() {
            let rhythm_days = self.tariff_dao.find_rhythm_days(entity.id, tx.clone()).await?;
            tariffs.push(Tariff::from_entities(entity, &rhythm_days));
        }
        let Some(tariff) = select_tariff(&tariffs, date) else {
            tracing::debug!(%employee_id, %date, "no tariff covers the date, off day");
            return Ok(None);
        };

        let week_plan = match (tariff.tariff_type, tariff.week_plan_id) {
            (TariffType::Week, Some(week_plan_id)) => Some(
                self.week_plan_dao
                    .find_by_id(week_plan_id, tx.clone())
                    .await?
                    .map(|entity| WeekPlan::from(&entity))
                    .ok_or(ServiceError::EntityNotFound(week_plan_id))?,
            ),
            (TariffType::Week, None) => return Err(ServiceError::MissingWeekPlan),
            (TariffType::Rhythm, _) => None,
        };

        match resolve_plan_id(tariff, week_plan.as_ref(), date) {
            Some(day_plan_id) => Ok(Some(self.load_day_plan(day_plan_id, tx).await?)),
            None => Ok(None),
        }
    }
}
