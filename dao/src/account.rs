use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

/// Ledger event for a bonus account credit or a capping transfer. The engine
/// emits these; downstream payroll export consumes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountPostingEntity {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub account_id: Uuid,
    pub minutes: i32,
    pub reason: Arc<str>,
    pub created: PrimitiveDateTime,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait AccountPostingDao {
    type Transaction: crate::Transaction;

    async fn insert(
        &self,
        entity: &AccountPostingEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn find_by_employee_and_range(
        &self,
        employee_id: Uuid,
        from: Date,
        to: Date,
        tx: Self::Transaction,
    ) -> Result<Arc<[AccountPostingEntity]>, DaoError>;
}
