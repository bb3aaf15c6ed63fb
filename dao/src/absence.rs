use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsenceUnitEntity {
    Day,
    Hour,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsenceCategoryEntity {
    Vacation,
    Sick,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsenceStatusEntity {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsenceTypeEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub code: Arc<str>,
    pub name: Arc<str>,
    pub priority: i32,
    pub unit: AbsenceUnitEntity,
    pub paid: bool,
    pub counts_as_worktime: bool,
    pub category: AbsenceCategoryEntity,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

/// One absence booking; unique per (employee, date). `duration` is a day
/// fraction, 0.50 or 1.00.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsenceDayEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub absence_type_id: Uuid,
    pub duration: Decimal,
    pub status: AbsenceStatusEntity,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait AbsenceDao {
    type Transaction: crate::Transaction;

    async fn find_type_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<AbsenceTypeEntity>, DaoError>;
    async fn all_types_by_tenant(
        &self,
        tenant_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[AbsenceTypeEntity]>, DaoError>;
    async fn find_day_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Option<AbsenceDayEntity>, DaoError>;
    async fn find_days_by_employee_and_range(
        &self,
        employee_id: Uuid,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[AbsenceDayEntity]>, DaoError>;
    async fn create_day(
        &self,
        entity: &AbsenceDayEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update_day(
        &self,
        entity: &AbsenceDayEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
