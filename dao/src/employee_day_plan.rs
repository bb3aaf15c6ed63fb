use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmployeeDayPlanSourceEntity {
    Tariff,
    Manual,
    Import,
}

/// Per-date day plan override; takes precedence over the tariff resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeDayPlanEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub day_plan_id: Option<Uuid>,
    pub source: EmployeeDayPlanSourceEntity,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait EmployeeDayPlanDao {
    type Transaction: crate::Transaction;

    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Option<EmployeeDayPlanEntity>, DaoError>;
    async fn upsert(
        &self,
        entity: &EmployeeDayPlanEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
