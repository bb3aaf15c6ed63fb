use time::Date;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmployeeDayPlanSource {
    Tariff,
    Manual,
    Import,
}

/// Per-date override of the tariff resolution for one employee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeDayPlan {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub day_plan_id: Option<Uuid>,
    pub source: EmployeeDayPlanSource,
    pub version: Uuid,
}

impl From<&dao::employee_day_plan::EmployeeDayPlanSourceEntity> for EmployeeDayPlanSource {
    fn from(source: &dao::employee_day_plan::EmployeeDayPlanSourceEntity) -> Self {
        match source {
            dao::employee_day_plan::EmployeeDayPlanSourceEntity::Tariff => Self::Tariff,
            dao::employee_day_plan::EmployeeDayPlanSourceEntity::Manual => Self::Manual,
            dao::employee_day_plan::EmployeeDayPlanSourceEntity::Import => Self::Import,
        }
    }
}

impl From<&dao::employee_day_plan::EmployeeDayPlanEntity> for EmployeeDayPlan {
    fn from(entity: &dao::employee_day_plan::EmployeeDayPlanEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            date: entity.date,
            day_plan_id: entity.day_plan_id,
            source: (&entity.source).into(),
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(
    dao::employee_day_plan::EmployeeDayPlanEntity,
    EmployeeDayPlan
);
