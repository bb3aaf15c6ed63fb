use std::fmt::Debug;

use async_trait::async_trait;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::ServiceError;
use crate::day_plan::DayPlan;
use crate::permission::Authentication;

/// Resolves which day plan applies to an employee on a date: per-date
/// override first, then the covering tariff through its week plan or
/// rhythm. `None` means an off day.
#[automock(type Context=(); type Transaction=dao::MockTransaction;)]
#[async_trait]
pub trait ScheduleService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;
    type Transaction: dao::Transaction;

    async fn resolve_day_plan(
        &self,
        employee_id: Uuid,
        date: Date,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<Option<DayPlan>, ServiceError>;
}
