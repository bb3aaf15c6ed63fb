use async_trait::async_trait;
use dao::TransactionDao;
use dao::monthly_value::MonthlyValueDao;
use service::closing::ClosingService;
use service::clock::ClockService;
use service::permission::{Authentication, PAYROLL_PRIVILEGE};
use service::{PermissionService, ServiceError};
use tracing::info;
use uuid::Uuid;

use crate::gen_service_impl;

const CLOSING_SERVICE_PROCESS: &str = "closing-service";

gen_service_impl! {
    struct ClosingServiceImpl: ClosingService = ClosingServiceDeps {
        MonthlyValueDao: dao::monthly_value::MonthlyValueDao<Transaction = Self::Transaction> = monthly_value_dao,
        PermissionService: service::PermissionService<Context = Self::Context> = permission_service,
        ClockService: service::clock::ClockService = clock_service,
        TransactionDao: dao::TransactionDao<Transaction = Self::Transaction> = transaction_dao
    }
}

#[async_trait]
impl<Deps: ClosingServiceDeps> ClosingService for ClosingServiceImpl<Deps> {
    type Context = Deps::Context;
    type Transaction = Deps::Transaction;

    async fn close_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError> {
        self.permission_service
            .check_permission(PAYROLL_PRIVILEGE, context.clone())
            .await?;
        let tx = self.transaction_dao.use_transaction(tx).await?;

        let monthly = self
            .monthly_value_dao
            .find_by_employee_and_month(employee_id, year, month, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(employee_id))?;
        if monthly.is_closed {
            return Ok(());
        }

        let user = self
            .permission_service
            .current_user_id(context)
            .await?
            .unwrap_or_else(|| "system".into());
        let stamp = dao::monthly_value::CloseStampEntity {
            closed_at: self.clock_service.date_time_now(),
            closed_by: user.clone(),
        };
        self.monthly_value_dao
            .set_closed(
                employee_id,
                year,
                month,
                &stamp,
                CLOSING_SERVICE_PROCESS,
                tx.clone(),
            )
            .await?;
        info!(%employee_id, year, month, %user, "month closed");
        self.transaction_dao.commit(tx).await?;
        Ok(())
    }

    async fn reopen_month(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        context: Authentication<Self::Context>,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError> {
        self.permission_service
            .check_permission(PAYROLL_PRIVILEGE, context.clone())
            .await?;
        let tx = self.transaction_dao.use_transaction(tx).await?;

        let monthly = self
            .monthly_value_dao
            .find_by_employee_and_month(employee_id, year, month, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(employee_id))?;
        if !monthly.is_closed {
            return Ok(());
        }

        let user = self
            .permission_service
            .current_user_id(context)
            .await?
            .unwrap_or_else(|| "system".into());
        self.monthly_value_dao
            .set_open(employee_id, year, month, CLOSING_SERVICE_PROCESS, tx.clone())
            .await?;
        // Reopening is audited: the actor lands in the log stream.
        info!(%employee_id, year, month, %user, "month reopened");
        self.transaction_dao.commit(tx).await?;
        Ok(())
    }

    async fn assert_month_open(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u8,
        tx: Option<Self::Transaction>,
    ) -> Result<(), ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let monthly = self
            .monthly_value_dao
            .find_by_employee_and_month(employee_id, year, month, tx)
            .await?;
        match monthly {
            Some(monthly) if monthly.is_closed => Err(ServiceError::MonthClosed { year, month }),
            _ => Ok(()),
        }
    }
}
