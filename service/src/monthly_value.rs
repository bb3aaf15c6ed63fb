use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

pub const WARNING_CAPPING_EXEMPTION_EXPIRED: &str = "capping_exemption_expired";

/// Engine output for one employee-month. `flextime_carryover` feeds the
/// next month's `flextime_start`. A closed month is immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyValue {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub year: i32,
    pub month: u8,
    pub total_gross: i32,
    pub total_net: i32,
    pub total_target: i32,
    pub total_overtime: i32,
    pub total_undertime: i32,
    pub total_break: i32,
    pub flextime_start: i32,
    pub flextime_change: i32,
    pub flextime_end: i32,
    pub flextime_carryover: i32,
    pub flextime_forfeited: i32,
    pub vacation_taken: Decimal,
    pub sick_days: Decimal,
    pub other_absence_days: Decimal,
    pub work_days: i32,
    pub days_with_errors: i32,
    pub warnings: Vec<Arc<str>>,
    pub is_closed: bool,
    #[serde(skip)]
    pub closed_at: Option<time::PrimitiveDateTime>,
    pub closed_by: Option<Arc<str>>,
    #[serde(skip)]
    pub version: Uuid,
}

impl MonthlyValue {
    pub fn empty(employee_id: Uuid, year: i32, month: u8) -> Self {
        Self {
            id: Uuid::nil(),
            employee_id,
            year,
            month,
            total_gross: 0,
            total_net: 0,
            total_target: 0,
            total_overtime: 0,
            total_undertime: 0,
            total_break: 0,
            flextime_start: 0,
            flextime_change: 0,
            flextime_end: 0,
            flextime_carryover: 0,
            flextime_forfeited: 0,
            vacation_taken: Decimal::ZERO,
            sick_days: Decimal::ZERO,
            other_absence_days: Decimal::ZERO,
            work_days: 0,
            days_with_errors: 0,
            warnings: Vec::new(),
            is_closed: false,
            closed_at: None,
            closed_by: None,
            version: Uuid::nil(),
        }
    }
}

impl From<&dao::monthly_value::MonthlyValueEntity> for MonthlyValue {
    fn from(entity: &dao::monthly_value::MonthlyValueEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            year: entity.year,
            month: entity.month,
            total_gross: entity.total_gross,
            total_net: entity.total_net,
            total_target: entity.total_target,
            total_overtime: entity.total_overtime,
            total_undertime: entity.total_undertime,
            total_break: entity.total_break,
            flextime_start: entity.flextime_start,
            flextime_change: entity.flextime_change,
            flextime_end: entity.flextime_end,
            flextime_carryover: entity.flextime_carryover,
            flextime_forfeited: entity.flextime_forfeited,
            vacation_taken: entity.vacation_taken,
            sick_days: entity.sick_days,
            other_absence_days: entity.other_absence_days,
            work_days: entity.work_days,
            days_with_errors: entity.days_with_errors,
            warnings: entity.warnings.to_vec(),
            is_closed: entity.is_closed,
            closed_at: entity.closed_at,
            closed_by: entity.closed_by.clone(),
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::monthly_value::MonthlyValueEntity, MonthlyValue);

impl MonthlyValue {
    pub fn to_entity(
        &self,
        created: time::PrimitiveDateTime,
    ) -> dao::monthly_value::MonthlyValueEntity {
        dao::monthly_value::MonthlyValueEntity {
            id: self.id,
            employee_id: self.employee_id,
            year: self.year,
            month: self.month,
            total_gross: self.total_gross,
            total_net: self.total_net,
            total_target: self.total_target,
            total_overtime: self.total_overtime,
            total_undertime: self.total_undertime,
            total_break: self.total_break,
            flextime_start: self.flextime_start,
            flextime_change: self.flextime_change,
            flextime_end: self.flextime_end,
            flextime_carryover: self.flextime_carryover,
            flextime_forfeited: self.flextime_forfeited,
            vacation_taken: self.vacation_taken,
            sick_days: self.sick_days,
            other_absence_days: self.other_absence_days,
            work_days: self.work_days,
            days_with_errors: self.days_with_errors,
            warnings: self.warnings.iter().cloned().collect(),
            is_closed: self.is_closed,
            closed_at: self.closed_at,
            closed_by: self.closed_by.clone(),
            created,
            deleted: None,
            version: self.version,
        }
    }
}
