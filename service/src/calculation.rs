use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::ServiceError;
use crate::daily_value::DailyValue;
use crate::monthly_value::MonthlyValue;
use crate::permission::Authentication;

/// Cooperative cancellation signal for long batch runs. Each per-employee
/// unit is atomic; a cancelled batch reports partial progress.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress report of a batch recomputation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    pub processed: u32,
    pub failed: u32,
    pub cancelled: bool,
}

#[automock(type Context=(); type Transaction=dao::MockTransaction;)]
#[async_trait]
pub trait CalculationService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;
    type Transaction: dao::Transaction;

    /// Recomputes and persists the daily value for one employee-day.
    async fn calculate_day_for_employee(
        &self,
        employee_id: Uuid,
        date: Date,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<DailyValue, ServiceError>;

    /// Recomputes all daily values of the month, aggregates them and
    /// persists the monthly value. Serialised per (employee, year, month).
    async fn calculate_month_for_employee(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<MonthlyValue, ServiceError>;

    /// Month recomputation for every employee of the tenant. Cancellable
    /// between employees; failures are counted, not propagated.
    async fn recalculate_all_employees(
        &self,
        tenant_id: Uuid,
        year: i32,
        month: u8,
        cancellation: CancellationFlag,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<BatchOutcome, ServiceError>;
}
