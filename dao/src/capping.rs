use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CappingTypeEntity {
    YearEnd,
    MidYear,
    Monthly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CappingActionEntity {
    Forfeit,
    TransferAccount,
    Payout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CappingRuleEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub capping_type: CappingTypeEntity,
    pub capping_month: Option<u8>,
    pub capping_day: Option<u8>,
    pub positive_cap: Option<i32>,
    pub negative_cap: Option<i32>,
    pub action: CappingActionEntity,
    pub transfer_account_id: Option<Uuid>,
    pub priority: i32,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

/// Exempts one employee from one capping rule for a date range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CappingExemptionEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub capping_rule_id: Uuid,
    pub valid_from: Date,
    pub valid_to: Option<Date>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait CappingDao {
    type Transaction: crate::Transaction;

    async fn all_rules(
        &self,
        tenant_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[CappingRuleEntity]>, DaoError>;
    async fn find_exemptions(
        &self,
        employee_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[CappingExemptionEntity]>, DaoError>;
    async fn create_rule(
        &self,
        entity: &CappingRuleEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn create_exemption(
        &self,
        entity: &CappingExemptionEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
