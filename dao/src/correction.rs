use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrectionTypeEntity {
    Overtime,
    Undertime,
    Flextime,
    Vacation,
    Sick,
}

/// Supervisor-supplied adjustment. `amount` is minutes for the time kinds
/// and days for vacation/sick. Applies only once `approved_by` is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectionEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub value_date: Date,
    pub correction_type: CorrectionTypeEntity,
    pub amount: Decimal,
    pub reason: Arc<str>,
    pub approved_by: Option<Arc<str>>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait CorrectionDao {
    type Transaction: crate::Transaction;

    async fn find_by_employee_and_range(
        &self,
        employee_id: Uuid,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[CorrectionEntity]>, DaoError>;
    async fn create(
        &self,
        entity: &CorrectionEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &CorrectionEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
