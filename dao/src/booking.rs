use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BookingKindEntity {
    Come,
    BreakStart,
    BreakEnd,
    Go,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingSourceEntity {
    Web,
    Terminal,
    Api,
    Import,
    Correction,
}

/// One raw punch event. `original_time` is immutable once written; edits go
/// to `edited_time`, the engine result to `calculated_time`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub kind: BookingKindEntity,
    pub original_time: i32,
    pub edited_time: Option<i32>,
    pub calculated_time: Option<i32>,
    pub pair_id: Option<Uuid>,
    pub source: BookingSourceEntity,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait BookingDao {
    type Transaction: crate::Transaction;

    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[BookingEntity]>, DaoError>;
    async fn find_by_employee_and_range(
        &self,
        employee_id: Uuid,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[BookingEntity]>, DaoError>;
    async fn create(
        &self,
        entity: &BookingEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &BookingEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
