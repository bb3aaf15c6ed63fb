use std::sync::Arc;

use uuid::Uuid;

use crate::holiday::HolidayCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanType {
    Fixed,
    Flextime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    None,
    Up,
    Down,
    Nearest,
}

/// Per-side rounding instruction; `interval` in minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rounding {
    pub mode: RoundingMode,
    pub interval: i32,
}

impl Rounding {
    pub fn none() -> Self {
        Self {
            mode: RoundingMode::None,
            interval: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakType {
    Fixed,
    Variable,
    Minimum,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakRule {
    pub id: Uuid,
    pub break_type: BreakType,
    pub start: i32,
    pub end: i32,
    pub duration: i32,
    pub after_work_minutes: Option<i32>,
    pub auto_deduct: bool,
    pub is_paid: bool,
    pub sort_order: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusCalculationType {
    Fixed,
    PerMinute,
    Percentage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusRule {
    pub id: Uuid,
    pub account_id: Uuid,
    pub time_from: i32,
    pub time_to: i32,
    pub calculation_type: BonusCalculationType,
    pub value_minutes: i32,
    pub min_work_minutes: Option<i32>,
    pub applies_on_holiday: bool,
    pub sort_order: i32,
}

/// Value snapshot of a day plan with its break and bonus rules resolved.
/// The calculators receive these as plain immutable inputs, never live
/// storage references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayPlan {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: Arc<str>,
    pub plan_type: PlanType,
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
    pub come_rounding: Rounding,
    pub go_rounding: Rounding,
    pub min_work_time: Option<i32>,
    pub max_net_work_time: Option<i32>,
    pub variable_worktime: bool,
    pub from_employee_master: bool,
    pub holiday_credit_category1: Option<i32>,
    pub holiday_credit_category2: Option<i32>,
    pub holiday_credit_category3: Option<i32>,
    pub breaks: Vec<BreakRule>,
    pub bonuses: Vec<BonusRule>,
    pub version: Uuid,
}

impl DayPlan {
    /// Credit minutes for a holiday of the given category against `target`,
    /// honouring the plan's per-category overrides.
    pub fn holiday_credit_for(&self, category: HolidayCategory, target: i32) -> i32 {
        let override_value = match category {
            HolidayCategory::FullCredit => self.holiday_credit_category1,
            HolidayCategory::HalfCredit => self.holiday_credit_category2,
            HolidayCategory::NoCredit => self.holiday_credit_category3,
        };
        override_value.unwrap_or_else(|| category.default_credit(target))
    }

    /// Tolerances only widen the accepted window on flextime plans with
    /// variable worktime.
    pub fn tolerance_expands_window(&self) -> bool {
        self.plan_type == PlanType::Flextime && self.variable_worktime
    }
}

impl From<&dao::day_plan::PlanTypeEntity> for PlanType {
    fn from(plan_type: &dao::day_plan::PlanTypeEntity) -> Self {
        match plan_type {
            dao::day_plan::PlanTypeEntity::Fixed => Self::Fixed,
            dao::day_plan::PlanTypeEntity::Flextime => Self::Flextime,
        }
    }
}
impl From<&PlanType> for dao::day_plan::PlanTypeEntity {
    fn from(plan_type: &PlanType) -> Self {
        match plan_type {
            PlanType::Fixed => Self::Fixed,
            PlanType::Flextime => Self::Flextime,
        }
    }
}

impl From<&dao::day_plan::RoundingModeEntity> for RoundingMode {
    fn from(mode: &dao::day_plan::RoundingModeEntity) -> Self {
        match mode {
            dao::day_plan::RoundingModeEntity::None => Self::None,
            dao::day_plan::RoundingModeEntity::Up => Self::Up,
            dao::day_plan::RoundingModeEntity::Down => Self::Down,
            dao::day_plan::RoundingModeEntity::Nearest => Self::Nearest,
        }
    }
}

impl From<&dao::day_plan::BreakTypeEntity> for BreakType {
    fn from(break_type: &dao::day_plan::BreakTypeEntity) -> Self {
        match break_type {
            dao::day_plan::BreakTypeEntity::Fixed => Self::Fixed,
            dao::day_plan::BreakTypeEntity::Variable => Self::Variable,
            dao::day_plan::BreakTypeEntity::Minimum => Self::Minimum,
        }
    }
}

impl From<&dao::day_plan::BonusCalculationTypeEntity> for BonusCalculationType {
    fn from(calculation_type: &dao::day_plan::BonusCalculationTypeEntity) -> Self {
        match calculation_type {
            dao::day_plan::BonusCalculationTypeEntity::Fixed => Self::Fixed,
            dao::day_plan::BonusCalculationTypeEntity::PerMinute => Self::PerMinute,
            dao::day_plan::BonusCalculationTypeEntity::Percentage => Self::Percentage,
        }
    }
}

impl From<&dao::day_plan::BreakRuleEntity> for BreakRule {
    fn from(entity: &dao::day_plan::BreakRuleEntity) -> Self {
        Self {
            id: entity.id,
            break_type: (&entity.break_type).into(),
            start: entity.start,
            end: entity.end,
            duration: entity.duration,
            after_work_minutes: entity.after_work_minutes,
            auto_deduct: entity.auto_deduct,
            is_paid: entity.is_paid,
            sort_order: entity.sort_order,
        }
    }
}

impl From<&dao::day_plan::BonusRuleEntity> for BonusRule {
    fn from(entity: &dao::day_plan::BonusRuleEntity) -> Self {
        Self {
            id: entity.id,
            account_id: entity.account_id,
            time_from: entity.time_from,
            time_to: entity.time_to,
            calculation_type: (&entity.calculation_type).into(),
            value_minutes: entity.value_minutes,
            min_work_minutes: entity.min_work_minutes,
            applies_on_holiday: entity.applies_on_holiday,
            sort_order: entity.sort_order,
        }
    }
}

impl DayPlan {
    /// Assemble the value snapshot from the plan row and its ordered child
    /// rows. Break and bonus rules are sorted by `sort_order` here so the
    /// calculators can rely on the ordering.
    pub fn from_entities(
        plan: &dao::day_plan::DayPlanEntity,
        breaks: &[dao::day_plan::BreakRuleEntity],
        bonuses: &[dao::day_plan::BonusRuleEntity],
    ) -> Self {
        let mut breaks: Vec<BreakRule> = breaks.iter().map(BreakRule::from).collect();
        breaks.sort_by_key(|rule| rule.sort_order);
        let mut bonuses: Vec<BonusRule> = bonuses.iter().map(BonusRule::from).collect();
        bonuses.sort_by_key(|rule| rule.sort_order);
        Self {
            id: plan.id,
            tenant_id: plan.tenant_id,
            name: plan.name.clone(),
            plan_type: (&plan.plan_type).into(),
            come_from: plan.come_from,
            come_to: plan.come_to,
            go_from: plan.go_from,
            go_to: plan.go_to,
            core_start: plan.core_start,
            core_end: plan.core_end,
            regular_hours: plan.regular_hours,
            tolerance_come_plus: plan.tolerance_come_plus,
            tolerance_come_minus: plan.tolerance_come_minus,
            tolerance_go_plus: plan.tolerance_go_plus,
            tolerance_go_minus: plan.tolerance_go_minus,
            come_rounding: Rounding {
                mode: (&plan.come_rounding_mode).into(),
                interval: plan.come_rounding_interval,
            },
            go_rounding: Rounding {
                mode: (&plan.go_rounding_mode).into(),
                interval: plan.go_rounding_interval,
            },
            min_work_time: plan.min_work_time,
            max_net_work_time: plan.max_net_work_time,
            variable_worktime: plan.variable_worktime,
            from_employee_master: plan.from_employee_master,
            holiday_credit_category1: plan.holiday_credit_category1,
            holiday_credit_category2: plan.holiday_credit_category2,
            holiday_credit_category3: plan.holiday_credit_category3,
            breaks,
            bonuses,
            version: plan.version,
        }
    }
}
