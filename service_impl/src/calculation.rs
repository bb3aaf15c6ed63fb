use std::sync::Arc;

use async_trait::async_trait;
use dao::TransactionDao;
use dao::absence::AbsenceDao;
use dao::account::AccountPostingDao;
use dao::booking::BookingDao;
use dao::capping::CappingDao;
use dao::correction::CorrectionDao;
use dao::daily_value::DailyValueDao;
use dao::employee::EmployeeDao;
use dao::holiday::HolidayDao;
use dao::monthly_value::MonthlyValueDao;
use service::absence::AbsenceDay;
use service::booking::Booking;
use service::calculation::{BatchOutcome, CalculationService, CancellationFlag};
use service::capping::{CappingExemption, CappingRule};
use service::closing::ClosingService;
use service::clock::ClockService;
use service::correction::Correction;
use service::daily_value::DailyValue;
use service::employee::Employee;
use service::holiday::Holiday;
use service::monthly_value::MonthlyValue;
use service::permission::{Authentication, TIMEKEEPING_PRIVILEGE};
use service::schedule::ScheduleService;
use service::uuid_service::UuidService;
use service::{PermissionService, ServiceError};
use terp_utils::{DateRange, month_bounds};
use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation_lock::CalculationLockRegistry;
use crate::daily_calculation::{DayCalculation, DayInput, calculate_day};
use crate::monthly_calculation::{AbsenceSummary, MonthInput, calculate_month};

const CALCULATION_SERVICE_PROCESS: &str = "calculation-service";

pub trait CalculationServiceDeps {
    type Context: Send + Sync + Clone + Eq + std::fmt::Debug + 'static;
    type Transaction: dao::Transaction + Send + Sync + Clone + std::fmt::Debug + 'static;
    type BookingDao: BookingDao<Transaction = Self::Transaction> + Sync + Send;
    type DailyValueDao: DailyValueDao<Transaction = Self::Transaction> + Sync + Send;
    type MonthlyValueDao: MonthlyValueDao<Transaction = Self::Transaction> + Sync + Send;
    type HolidayDao: HolidayDao<Transaction = Self::Transaction> + Sync + Send;
    type AbsenceDao: AbsenceDao<Transaction = Self::Transaction> + Sync + Send;
    type EmployeeDao: EmployeeDao<Transaction = Self::Transaction> + Sync + Send;
    type CorrectionDao: CorrectionDao<Transaction = Self::Transaction> + Sync + Send;
    type CappingDao: CappingDao<Transaction = Self::Transaction> + Sync + Send;
    type AccountPostingDao: AccountPostingDao<Transaction = Self::Transaction> + Sync + Send;
    type ScheduleService: ScheduleService<Context = Self::Context, Transaction = Self::Transaction>
        + Sync
        + Send;
    type ClosingService: ClosingService<Context = Self::Context, Transaction = Self::Transaction>
        + Sync
        + Send;
    type PermissionService: PermissionService<Context = Self::Context> + Sync + Send;
    type ClockService: ClockService + Sync + Send;
    type UuidService: UuidService + Sync + Send;
    type TransactionDao: TransactionDao<Transaction = Self::Transaction> + Sync + Send;
}

pub struct CalculationServiceImpl<Deps: CalculationServiceDeps> {
    pub booking_dao: Arc<Deps::BookingDao>,
    pub daily_value_dao: Arc<Deps::DailyValueDao>,
    pub monthly_value_dao: Arc<Deps::MonthlyValueDao>,
    pub holiday_dao: Arc<Deps::HolidayDao>,
    pub absence_dao: Arc<Deps::AbsenceDao>,
    pub employee_dao: Arc<Deps::EmployeeDao>,
    pub correction_dao: Arc<Deps::CorrectionDao>,
    pub capping_dao: Arc<Deps::CappingDao>,
    pub account_posting_dao: Arc<Deps::AccountPostingDao>,
    pub schedule_service: Arc<Deps::ScheduleService>,
    pub closing_service: Arc<Deps::ClosingService>,
    pub permission_service: Arc<Deps::PermissionService>,
    pub clock_service: Arc<Deps::ClockService>,
    pub uuid_service: Arc<Deps::UuidService>,
    pub transaction_dao: Arc<Deps::TransactionDao>,
    pub calculation_locks: Arc<CalculationLockRegistry>,
}

impl<Deps: CalculationServiceDeps> CalculationServiceImpl<Deps> {
    async fn load_employee(
        &self,
        employee_id: Uuid,
        tx: Deps::Transaction,
    ) -> Result<Employee, ServiceError> {
        let entity = self.employee_dao.find_by_id(employee_id, tx).await?;
        entity
            .as_ref()
            .map(Employee::from)
            .ok_or(ServiceError::EntityNotFound(employee_id))
    }

    /// The holiday relevant to the employee on that date; department-scoped
    /// holidays only count for their department, highest priority wins.
    async fn load_applicable_holiday(
        &self,
        employee: &Employee,
        date: Date,
        tx: Deps::Transaction,
    ) -> Result<Option<Holiday>, ServiceError> {
        let entities = self
            .holiday_dao
            .find_by_date(employee.tenant_id, date, tx)
            .await?;
        Ok(entities
            .iter()
            .map(Holiday::from)
            .filter(|holiday| holiday.applies_to_department(employee.department_id))
            .max_by(|a, b| a.priority.cmp(&b.priority).then(a.id.cmp(&b.id))))
    }

    async fn load_absence(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Deps::Transaction,
    ) -> Result<Option<AbsenceDay>, ServiceError> {
        let Some(day) = self
            .absence_dao
            .find_day_by_employee_and_date(employee_id, date, tx.clone())
            .await?
        else {
            return Ok(None);
        };
        let absence_type = self
            .absence_dao
            .find_type_by_id(day.absence_type_id, tx)
            .await?
            .ok_or(ServiceError::EntityNotFound(day.absence_type_id))?;
        Ok(Some(AbsenceDay::from_entities(&day, &absence_type)))
    }

    async fn load_corrections(
        &self,
        employee_id: Uuid,
        from: Date,
        to: Date,
        tx: Deps::Transaction,
    ) -> Result<Vec<Correction>, ServiceError> {
        Ok(self
            .correction_dao
            .find_by_employee_and_range(employee_id, from, to, tx)
            .await?
            .iter()
            .map(Correction::from)
            .collect())
    }

    /// Loads all inputs of one employee-day and runs the pure calculator.
    async fn compute_day(
        &self,
        employee: &Employee,
        date: Date,
        tx: Deps::Transaction,
    ) -> Result<DayCalculation, ServiceError> {
        let day_plan = self
            .schedule_service
            .resolve_day_plan(employee.id, date, Authentication::Full, Some(tx.clone()))
            .await?;
        let bookings: Vec<Booking> = self
            .booking_dao
            .find_by_employee_and_date(employee.id, date, tx.clone())
            .await?
            .iter()
            .map(Booking::from)
            .collect();
        let holiday = self
            .load_applicable_holiday(employee, date, tx.clone())
            .await?;
        let absence = self.load_absence(employee.id, date, tx.clone()).await?;
        let corrections = self.load_corrections(employee.id, date, date, tx).await?;

        Ok(calculate_day(&DayInput {
            date,
            day_plan: day_plan.as_ref(),
            bookings: &bookings,
            holiday: holiday.as_ref(),
            absence: absence.as_ref(),
            corrections: &corrections,
            employee,
        }))
    }

    /// Persists a day calculation, reusing the id of an existing value so
    /// recomputation stays idempotent.
    async fn store_day(
        &self,
        calculation: &DayCalculation,
        tx: Deps::Transaction,
    ) -> Result<DailyValue, ServiceError> {
        let mut value = calculation.value.clone();
        let existing = self
            .daily_value_dao
            .find_by_employee_and_date(value.employee_id, value.date, tx.clone())
            .await?;
        value.id = existing
            .map(|entity| entity.id)
            .unwrap_or_else(|| self.uuid_service.new_uuid("daily-value id"));
        value.version = self.uuid_service.new_uuid("daily-value version");

        let now = self.clock_service.date_time_now();
        self.daily_value_dao
            .upsert(&value.to_entity(now), CALCULATION_SERVICE_PROCESS, tx.clone())
            .await?;
        for posting in &calculation.postings {
            let entity = posting.to_entity(
                self.uuid_service.new_uuid("account-posting id"),
                now,
                self.uuid_service.new_uuid("account-posting version"),
            );
            self.account_posting_dao
                .insert(&entity, CALCULATION_SERVICE_PROCESS, tx.clone())
                .await?;
        }
        Ok(value)
    }
}

#[async_trait]
impl<Deps: CalculationServiceDeps> CalculationService for CalculationServiceImpl<Deps> {
    type Context = Deps::Context;
    type Transaction = Deps::Transaction;

    async fn calculate_day_for_employee(
        &self,
        employee_id: Uuid,
        date: Date,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<DailyValue, ServiceError> {
        self.permission_service
            .check_permission(TIMEKEEPING_PRIVILEGE, context)
            .await?;
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.closing_service
            .assert_month_open(
                employee_id,
                date.year(),
                date.month().into(),
                Some(tx.clone()),
            )
            .await?;

        let employee = self.load_employee(employee_id, tx.clone()).await?;
        let calculation = self.compute_day(&employee, date, tx.clone()).await?;
        let value = self.store_day(&calculation, tx.clone()).await?;
        self.transaction_dao.commit(tx).await?;
        Ok(value)
    }

    async fn calculate_month_for_employee(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<MonthlyValue, ServiceError> {
        self.permission_service
            .check_permission(TIMEKEEPING_PRIVILEGE, context)
            .await?;
        let (first_day, last_day) = month_bounds(year, month)?;
        if first_day > self.clock_service.date_now() {
            return Err(ServiceError::FutureMonth { year, month });
        }

        // Serialise recomputation per employee-month.
        let _guard = self.calculation_locks.acquire(employee_id, year, month).await;

        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.closing_service
            .assert_month_open(employee_id, year, month, Some(tx.clone()))
            .await?;
        let employee = self.load_employee(employee_id, tx.clone()).await?;

        let mut daily_values = Vec::new();
        for date in DateRange::new(first_day, last_day) {
            let calculation = self.compute_day(&employee, date, tx.clone()).await?;
            daily_values.push(self.store_day(&calculation, tx.clone()).await?);
        }

        let (previous_year, previous_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let previous_carryover = self
            .monthly_value_dao
            .find_by_employee_and_month(employee_id, previous_year, previous_month, tx.clone())
            .await?
            .map(|entity| entity.flextime_carryover)
            .unwrap_or(0);

        let capping_rules: Vec<CappingRule> = self
            .capping_dao
            .all_rules(employee.tenant_id, tx.clone())
            .await?
            .iter()
            .map(CappingRule::from)
            .collect();
        let exemptions: Vec<CappingExemption> = self
            .capping_dao
            .find_exemptions(employee_id, tx.clone())
            .await?
            .iter()
            .map(CappingExemption::from)
            .collect();

        let absence_types = self
            .absence_dao
            .all_types_by_tenant(employee.tenant_id, tx.clone())
            .await?;
        let absences: Vec<AbsenceDay> = self
            .absence_dao
            .find_days_by_employee_and_range(employee_id, first_day, last_day, tx.clone())
            .await?
            .iter()
            .filter_map(|day| {
                absence_types
                    .iter()
                    .find(|absence_type| absence_type.id == day.absence_type_id)
                    .map(|absence_type| AbsenceDay::from_entities(day, absence_type))
            })
            .collect();
        let absence_summary = AbsenceSummary::from_absences(&absences);

        let corrections = self
            .load_corrections(employee_id, first_day, last_day, tx.clone())
            .await?;

        let calculation = calculate_month(&MonthInput {
            employee: &employee,
            year,
            month,
            daily_values: &daily_values,
            previous_carryover,
            capping_rules: &capping_rules,
            exemptions: &exemptions,
            absence_summary: &absence_summary,
            corrections: &corrections,
        })?;

        let mut value = calculation.value;
        value.id = self
            .monthly_value_dao
            .find_by_employee_and_month(employee_id, year, month, tx.clone())
            .await?
            .map(|entity| entity.id)
            .unwrap_or_else(|| self.uuid_service.new_uuid("monthly-value id"));
        value.version = self.uuid_service.new_uuid("monthly-value version");

        let now = self.clock_service.date_time_now();
        self.monthly_value_dao
            .upsert(&value.to_entity(now), CALCULATION_SERVICE_PROCESS, tx.clone())
            .await?;
        for posting in &calculation.postings {
            let entity = posting.to_entity(
                self.uuid_service.new_uuid("account-posting id"),
                now,
                self.uuid_service.new_uuid("account-posting version"),
            );
            self.account_posting_dao
                .insert(&entity, CALCULATION_SERVICE_PROCESS, tx.clone())
                .await?;
        }
        self.transaction_dao.commit(tx).await?;
        info!(%employee_id, year, month, flextime_end = value.flextime_end, "month calculated");
        Ok(value)
    }

    async fn recalculate_all_employees(
        &self,
        tenant_id: Uuid,
        year: i32,
        month: u8,
        cancellation: CancellationFlag,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<BatchOutcome, ServiceError> {
        self.permission_service
            .check_permission(TIMEKEEPING_PRIVILEGE, context)
            .await?;
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let employees = self.employee_dao.all_by_tenant(tenant_id, tx).await?;

        let mut outcome = BatchOutcome::default();
        for employee in employees.iter() {
            if cancellation.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            // One transaction per employee keeps the unit atomic and the
            // batch restartable.
            match self
                .calculate_month_for_employee(
                    employee.id,
                    year,
                    month,
                    Authentication::Full,
                    None,
                )
                .await
            {
                Ok(_) => outcome.processed += 1,
                Err(error) => {
                    warn!(employee_id = %employee.id, %error, "employee month recalculation failed");
                    outcome.failed += 1;
                }
            }
        }
        info!(
            processed = outcome.processed,
            failed = outcome.failed,
            cancelled = outcome.cancelled,
            "batch recalculation finished"
        );
        Ok(outcome)
    }
}
