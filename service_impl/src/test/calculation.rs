use std::sync::Arc;

use dao::absence::MockAbsenceDao;
use dao::account::MockAccountPostingDao;
use dao::booking::MockBookingDao;
use dao::capping::MockCappingDao;
use dao::correction::MockCorrectionDao;
use dao::daily_value::MockDailyValueDao;
use dao::employee::EmployeeEntity;
use dao::holiday::MockHolidayDao;
use dao::monthly_value::MockMonthlyValueDao;
use dao::{MockTransaction, MockTransactionDao};
use rust_decimal::Decimal;
use service::ServiceError;
use service::calculation::{CalculationService, CancellationFlag};
use service::clock::MockClockService;
use service::closing::MockClosingService;
use service::permission::{Authentication, MockPermissionService};
use service::schedule::MockScheduleService;
use service::uuid_service::MockUuidService;
use time::macros::{date, datetime};
use uuid::{Uuid, uuid};

use crate::calculation::{CalculationServiceDeps, CalculationServiceImpl};
use crate::calculation_lock::CalculationLockRegistry;

fn default_employee_id() -> Uuid {
    uuid!("04215DFE-13C4-413C-8C66-77AC741BB5F0")
}

fn default_tenant_id() -> Uuid {
    uuid!("F79C462A-8D4E-42E1-8171-DB4DBD019E50")
}

fn default_employee_entity() -> EmployeeEntity {
    EmployeeEntity {
        id: default_employee_id(),
        tenant_id: default_tenant_id(),
        department_id: None,
        hire_date: date!(2020 - 01 - 01),
        exit_date: None,
        birth_date: None,
        has_disability: false,
        weekly_hours: Decimal::new(4000, 2),
        vacation_entitlement: Decimal::new(3000, 2),
        target_hours_daily: None,
        target_hours_weekly: None,
        target_hours_monthly: None,
        target_hours_annual: None,
        created: datetime!(2024 - 01 - 01 00:00),
        deleted: None,
        version: Uuid::nil(),
    }
}

pub struct CalculationServiceDependencies {
    pub booking_dao: MockBookingDao,
    pub daily_value_dao: MockDailyValueDao,
    pub monthly_value_dao: MockMonthlyValueDao,
    pub holiday_dao: MockHolidayDao,
    pub absence_dao: MockAbsenceDao,
    pub employee_dao: dao::employee::MockEmployeeDao,
    pub correction_dao: MockCorrectionDao,
    pub capping_dao: MockCappingDao,
    pub account_posting_dao: MockAccountPostingDao,
    pub schedule_service: MockScheduleService,
    pub closing_service: MockClosingService,
    pub permission_service: MockPermissionService,
    pub clock_service: MockClockService,
    pub uuid_service: MockUuidService,
}

impl CalculationServiceDeps for CalculationServiceDependencies {
    type Context = ();
    type Transaction = MockTransaction;
    type BookingDao = MockBookingDao;
    type DailyValueDao = MockDailyValueDao;
    type MonthlyValueDao = MockMonthlyValueDao;
    type HolidayDao = MockHolidayDao;
    type AbsenceDao = MockAbsenceDao;
    type EmployeeDao = dao::employee::MockEmployeeDao;
    type CorrectionDao = MockCorrectionDao;
    type CappingDao = MockCappingDao;
    type AccountPostingDao = MockAccountPostingDao;
    type ScheduleService = MockScheduleService;
    type ClosingService = MockClosingService;
    type PermissionService = MockPermissionService;
    type ClockService = MockClockService;
    type UuidService = MockUuidService;
    type TransactionDao = MockTransactionDao;
}

impl CalculationServiceDependencies {
    pub fn build_service(self) -> CalculationServiceImpl<CalculationServiceDependencies> {
        let mut transaction_dao = MockTransactionDao::new();
        transaction_dao
            .expect_use_transaction()
            .returning(|_| Ok(MockTransaction));
        transaction_dao.expect_commit().returning(|_| Ok(()));

        CalculationServiceImpl {
            booking_dao: Arc::new(self.booking_dao),
            daily_value_dao: Arc::new(self.daily_value_dao),
            monthly_value_dao: Arc::new(self.monthly_value_dao),
            holiday_dao: Arc::new(self.holiday_dao),
            absence_dao: Arc::new(self.absence_dao),
            employee_dao: Arc::new(self.employee_dao),
            correction_dao: Arc::new(self.correction_dao),
            capping_dao: Arc::new(self.capping_dao),
            account_posting_dao: Arc::new(self.account_posting_dao),
            schedule_service: Arc::new(self.schedule_service),
            closing_service: Arc::new(self.closing_service),
            permission_service: Arc::new(self.permission_service),
            clock_service: Arc::new(self.clock_service),
            uuid_service: Arc::new(self.uuid_service),
            transaction_dao: Arc::new(transaction_dao),
            calculation_locks: Arc::new(CalculationLockRegistry::new()),
        }
    }
}

fn build_dependencies() -> CalculationServiceDependencies {
    let mut deps = CalculationServiceDependencies {
        booking_dao: MockBookingDao::new(),
        daily_value_dao: MockDailyValueDao::new(),
        monthly_value_dao: MockMonthlyValueDao::new(),
        holiday_dao: MockHolidayDao::new(),
        absence_dao: MockAbsenceDao::new(),
        employee_dao: dao::employee::MockEmployeeDao::new(),
        correction_dao: MockCorrectionDao::new(),
        capping_dao: MockCappingDao::new(),
        account_posting_dao: MockAccountPostingDao::new(),
        schedule_service: MockScheduleService::new(),
        closing_service: MockClosingService::new(),
        permission_service: MockPermissionService::new(),
        clock_service: MockClockService::new(),
        uuid_service: MockUuidService::new(),
    };
    deps.permission_service
        .expect_check_permission()
        .returning(|_, _| Ok(()));
    deps
}

trait NoneTypeExt {
    fn auth(&self) -> Authentication<()>;
}
impl NoneTypeExt for () {
    fn auth(&self) -> Authentication<()> {
        Authentication::Context(())
    }
}

#[tokio::test]
async fn test_calculate_day_persists_a_fresh_value() {
    let mut deps = build_dependencies();
    deps.closing_service
        .expect_assert_month_open()
        .returning(|_, _, _, _| Ok(()));
    deps.employee_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(Some(default_employee_entity())));
    deps.schedule_service
        .expect_resolve_day_plan()
        .returning(|_, _, _, _| Ok(None));
    deps.booking_dao
        .expect_find_by_employee_and_date()
        .returning(|_, _, _| Ok([].into()));
    deps.holiday_dao
        .expect_find_by_date()
        .returning(|_, _, _| Ok([].into()));
    deps.absence_dao
        .expect_find_day_by_employee_and_date()
        .returning(|_, _, _| Ok(None));
    deps.correction_dao
        .expect_find_by_employee_and_range()
        .returning(|_, _, _, _| Ok([].into()));
    deps.daily_value_dao
        .expect_find_by_employee_and_date()
        .returning(|_, _, _| Ok(None));
    deps.daily_value_dao
        .expect_upsert()
        .times(1)
        .returning(|_, _, _| Ok(()));
    deps.uuid_service
        .expect_new_uuid()
        .returning(|_| Uuid::new_v4());
    deps.clock_service
        .expect_date_time_now()
        .returning(|| datetime!(2024 - 03 - 05 08:00));

    let service = deps.build_service();
    let result = service
        .calculate_day_for_employee(default_employee_id(), date!(2024 - 03 - 04), ().auth(), None)
        .await;
    let value = result.expect("expected Ok daily value");
    assert_eq!(value.employee_id, default_employee_id());
    assert_eq!(value.date, date!(2024 - 03 - 04));
    assert_eq!(value.net_time, 0);
    assert!(!value.has_error);
}

#[tokio::test]
async fn test_calculate_day_against_closed_month_fails_without_writes() {
    let mut deps = build_dependencies();
    deps.closing_service
        .expect_assert_month_open()
        .returning(|_, year, month, _| Err(ServiceError::MonthClosed { year, month }));
    // No daily_value_dao.upsert expectation: a write would panic the mock.

    let service = deps.build_service();
    let result = service
        .calculate_day_for_employee(default_employee_id(), date!(2024 - 03 - 04), ().auth(), None)
        .await;
    assert!(matches!(
        result,
        Err(ServiceError::MonthClosed {
            year: 2024,
            month: 3
        })
    ));
}

#[tokio::test]
async fn test_future_month_is_rejected() {
    let mut deps = build_dependencies();
    deps.clock_service
        .expect_date_now()
        .returning(|| date!(2024 - 01 - 15));

    let service = deps.build_service();
    let result = service
        .calculate_month_for_employee(default_employee_id(), 2024, 2, ().auth(), None)
        .await;
    assert!(matches!(
        result,
        Err(ServiceError::FutureMonth {
            year: 2024,
            month: 2
        })
    ));
}

#[tokio::test]
async fn test_missing_employee_is_reported() {
    let mut deps = build_dependencies();
    deps.closing_service
        .expect_assert_month_open()
        .returning(|_, _, _, _| Ok(()));
    deps.employee_dao.expect_find_by_id().returning(|_, _| Ok(None));

    let service = deps.build_service();
    let result = service
        .calculate_day_for_employee(default_employee_id(), date!(2024 - 03 - 04), ().auth(), None)
        .await;
    assert!(matches!(result, Err(ServiceError::EntityNotFound(id)) if id == default_employee_id()));
}

#[tokio::test]
async fn test_cancelled_batch_reports_partial_progress() {
    let mut deps = build_dependencies();
    deps.employee_dao
        .expect_all_by_tenant()
        .returning(|_, _| Ok([default_employee_entity()].into()));

    let cancellation = CancellationFlag::new();
    cancellation.cancel();

    let service = deps.build_service();
    let outcome = service
        .recalculate_all_employees(
            default_tenant_id(),
            2024,
            1,
            cancellation,
            ().auth(),
            None,
        )
        .await
        .expect("expected Ok batch outcome");
    assert!(outcome.cancelled);
    assert_eq!(outcome.processed, 0);
    assert_eq!(outcome.failed, 0);
}

#[tokio::test]
async fn test_batch_counts_failures_instead_of_aborting() {
    let mut deps = build_dependencies();
    deps.employee_dao
        .expect_all_by_tenant()
        .returning(|_, _| Ok([default_employee_entity()].into()));
    // The per-employee month calculation fails at the future-month gate.
    deps.clock_service
        .expect_date_now()
        .returning(|| date!(2023 - 12 - 15));

    let service = deps.build_service();
    let outcome = service
        .recalculate_all_employees(
            default_tenant_id(),
            2024,
            1,
            CancellationFlag::new(),
            ().auth(),
            None,
        )
        .await
        .expect("expected Ok batch outcome");
    assert!(!outcome.cancelled);
    assert_eq!(outcome.processed, 0);
    assert_eq!(outcome.failed, 1);
}
