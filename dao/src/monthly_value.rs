use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::DaoError;

/// Engine output for one employee-month; unique per (employee, year, month).
/// A closed month is immutable until explicitly reopened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyValueEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub year: i32,
    pub month: u8,
    pub total_gross: i32,
    pub total_net: i32,
    pub total_target: i32,
    pub total_overtime: i32,
    pub total_undertime: i32,
    pub total_break: i32,
    pub flextime_start: i32,
    pub flextime_change: i32,
    pub flextime_end: i32,
    pub flextime_carryover: i32,
    pub flextime_forfeited: i32,
    pub vacation_taken: Decimal,
    pub sick_days: Decimal,
    pub other_absence_days: Decimal,
    pub work_days: i32,
    pub days_with_errors: i32,
    pub warnings: Arc<[Arc<str>]>,
    pub is_closed: bool,
    pub closed_at: Option<PrimitiveDateTime>,
    pub closed_by: Option<Arc<str>>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

/// Audit stamp written when a month is closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseStampEntity {
    pub closed_at: PrimitiveDateTime,
    pub closed_by: Arc<str>,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait MonthlyValueDao {
    type Transaction: crate::Transaction;

    async fn find_by_employee_and_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        tx: Self::Transaction,
    ) -> Result<Option<MonthlyValueEntity>, DaoError>;
    async fn upsert(
        &self,
        entity: &MonthlyValueEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn set_closed(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        stamp: &CloseStampEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn set_open(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
