use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::DaoError;

/// Weekly pattern: one optional day plan per weekday, monday through sunday.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekPlanEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: Arc<str>,

    pub monday: Option<Uuid>,
    pub tuesday: Option<Uuid>,
    pub wednesday: Option<Uuid>,
    pub thursday: Option<Uuid>,
    pub friday: Option<Uuid>,
    pub saturday: Option<Uuid>,
    pub sunday: Option<Uuid>,

    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait WeekPlanDao {
    type Transaction: crate::Transaction;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<WeekPlanEntity>, DaoError>;
    async fn all_by_tenant(
        &self,
        tenant_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[WeekPlanEntity]>, DaoError>;
    async fn create(
        &self,
        entity: &WeekPlanEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &WeekPlanEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
