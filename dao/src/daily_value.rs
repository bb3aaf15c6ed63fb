use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

/// One capped slice of a day, `source` is a machine-readable code such as
/// `early_arrival` or `max_net_time`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CappingItemEntity {
    pub minutes: i32,
    pub source: Arc<str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakItemEntity {
    pub minutes: i32,
    pub reason: Arc<str>,
}

/// Engine output for one employee-day; unique per (employee, date),
/// recomputed idempotently while the enclosing month is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyValueEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub gross_time: i32,
    pub net_time: i32,
    pub credited_time: i32,
    pub target_time: i32,
    pub overtime: i32,
    pub undertime: i32,
    pub break_time: i32,
    pub capped_minutes: i32,
    pub capping_items: Arc<[CappingItemEntity]>,
    pub break_items: Arc<[BreakItemEntity]>,
    pub first_come: Option<i32>,
    pub last_go: Option<i32>,
    pub has_error: bool,
    pub warnings: Arc<[Arc<str>]>,
    pub holiday_code: Option<Arc<str>>,
    pub absence_code: Option<Arc<str>>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait DailyValueDao {
    type Transaction: crate::Transaction;

    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Option<DailyValueEntity>, DaoError>;
    async fn find_by_employee_and_range(
        &self,
        employee_id: Uuid,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[DailyValueEntity]>, DaoError>;
    async fn upsert(
        &self,
        entity: &DailyValueEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
