use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod absence;
pub mod account;
pub mod booking;
pub mod capping;
pub mod correction;
pub mod daily_value;
pub mod day_plan;
pub mod employee;
pub mod employee_day_plan;
pub mod holiday;
pub mod monthly_value;
pub mod tariff;
pub mod week_plan;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Marker for a storage transaction handle. The concrete type is supplied by
/// the storage implementation crate.
pub trait Transaction {}

/// Stand-in transaction for mock-backed tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockTransaction;
impl Transaction for MockTransaction {}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait TransactionDao {
    type Transaction: Transaction;

    async fn new_transaction(&self) -> Result<Self::Transaction, DaoError>;
    async fn use_transaction(
        &self,
        tx: Option<Self::Transaction>,
    ) -> Result<Self::Transaction, DaoError>;
    async fn commit(&self, transaction: Self::Transaction) -> Result<(), DaoError>;
}
