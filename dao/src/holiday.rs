use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolidayCategoryEntity {
    FullCredit,
    HalfCredit,
    NoCredit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub date: Date,
    pub name: Arc<str>,
    pub category: HolidayCategoryEntity,
    pub absence_code: Option<Arc<str>>,
    pub priority: i32,
    pub applies_to_all: bool,
    pub department_id: Option<Uuid>,
    pub is_half_day: bool,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait HolidayDao {
    type Transaction: crate::Transaction;

    async fn find_by_date(
        &self,
        tenant_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[HolidayEntity]>, DaoError>;
    async fn find_by_range(
        &self,
        tenant_id: Uuid,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[HolidayEntity]>, DaoError>;
    async fn create(
        &self,
        entity: &HolidayEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &HolidayEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
