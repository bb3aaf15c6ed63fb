use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TariffTypeEntity {
    Week,
    Rhythm,
}

/// Maps calendar dates to day plans for one employee, either through a week
/// plan or a repeating rhythm of `rhythm_days` entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TariffEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
    pub valid_from: Date,
    pub valid_to: Option<Date>,
    pub tariff_type: TariffTypeEntity,
    pub week_plan_id: Option<Uuid>,
    pub rhythm_days: Option<i32>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

/// One slot of a rhythm tariff. `day_plan_id = None` marks an off day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RhythmDayEntity {
    pub id: Uuid,
    pub tariff_id: Uuid,
    pub day_index: i32,
    pub day_plan_id: Option<Uuid>,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait TariffDao {
    type Transaction: crate::Transaction;

    async fn find_by_employee_id(
        &self,
        employee_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[TariffEntity]>, DaoError>;
    async fn find_rhythm_days(
        &self,
        tariff_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[RhythmDayEntity]>, DaoError>;
    async fn create(
        &self,
        entity: &TariffEntity,
        rhythm_days: &[RhythmDayEntity],
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &TariffEntity,
        rhythm_days: &[RhythmDayEntity],
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
