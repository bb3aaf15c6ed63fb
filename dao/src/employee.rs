use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

/// The slice of the employee master record the calculation engine needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub department_id: Option<Uuid>,
    pub hire_date: Date,
    pub exit_date: Option<Date>,
    pub birth_date: Option<Date>,
    pub has_disability: bool,
    pub weekly_hours: Decimal,
    pub vacation_entitlement: Decimal,
    pub target_hours_daily: Option<i32>,
    pub target_hours_weekly: Option<i32>,
    pub target_hours_monthly: Option<i32>,
    pub target_hours_annual: Option<i32>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait EmployeeDao {
    type Transaction: crate::Transaction;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<EmployeeEntity>, DaoError>;
    async fn all_by_tenant(
        &self,
        tenant_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[EmployeeEntity]>, DaoError>;
}
