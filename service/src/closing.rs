use std::fmt::Debug;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::ServiceError;
use crate::permission::Authentication;

/// Month closing: a closed month rejects any further value upserts until an
/// audited reopen clears the flag.
#[automock(type Context=(); type Transaction=dao::MockTransaction;)]
#[async_trait]
pub trait ClosingService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;
    type Transaction: dao::Transaction;

    async fn close_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError>;

    async fn reopen_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError>;

    /// Fails with `MonthClosed` when the month of `year`/`month` is closed.
    async fn assert_month_open(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError>;
}
