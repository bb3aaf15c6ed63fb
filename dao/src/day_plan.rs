use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanTypeEntity {
    Fixed,
    Flextime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingModeEntity {
    None,
    Up,
    Down,
    Nearest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakTypeEntity {
    Fixed,
    Variable,
    Minimum,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusCalculationTypeEntity {
    Fixed,
    PerMinute,
    Percentage,
}

/// Template for one working day: presence windows, tolerances, rounding,
/// target time and caps. Break and bonus rules are child rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayPlanEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: Arc<str>,
    pub plan_type: PlanTypeEntity,
    pub come_from: Option<i32>,
    pub come_to: Option<i32>,
    pub go_from: Option<i32>,
    pub go_to: Option<i32>,
    pub core_start: Option<i32>,
    pub core_end: Option<i32>,
    pub regular_hours: i32,
    pub tolerance_come_plus: i32,
    pub tolerance_come_minus: i32,
    pub tolerance_go_plus: i32,
    pub tolerance_go_minus: i32,
    pub come_rounding_mode: RoundingModeEntity,
    pub come_rounding_interval: i32,
    pub go_rounding_mode: RoundingModeEntity,
    pub go_rounding_interval: i32,
    pub min_work_time: Option<i32>,
    pub max_net_work_time: Option<i32>,
    pub variable_worktime: bool,
    pub from_employee_master: bool,
    pub holiday_credit_category1: Option<i32>,
    pub holiday_credit_category2: Option<i32>,
    pub holiday_credit_category3: Option<i32>,
    pub created: PrimitiveDateTime,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakRuleEntity {
    pub id: Uuid,
    pub day_plan_id: Uuid,
    pub break_type: BreakTypeEntity,
    pub start: i32,
    pub end: i32,
    pub duration: i32,
    pub after_work_minutes: Option<i32>,
    pub auto_deduct: bool,
    pub is_paid: bool,
    pub sort_order: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusRuleEntity {
    pub id: Uuid,
    pub day_plan_id: Uuid,
    pub account_id: Uuid,
    pub time_from: i32,
    pub time_to: i32,
    pub calculation_type: BonusCalculationTypeEntity,
    pub value_minutes: i32,
    pub min_work_minutes: Option<i32>,
    pub applies_on_holiday: bool,
    pub sort_order: i32,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait DayPlanDao {
    type Transaction: crate::Transaction;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<DayPlanEntity>, DaoError>;
    async fn all_by_tenant(
        &self,
        tenant_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[DayPlanEntity]>, DaoError>;
    async fn find_breaks(
        &self,
        day_plan_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[BreakRuleEntity]>, DaoError>;
    async fn find_bonuses(
        &self,
        day_plan_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[BonusRuleEntity]>, DaoError>;
    async fn create(
        &self,
        entity: &DayPlanEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
    async fn update(
        &self,
        entity: &DayPlanEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
