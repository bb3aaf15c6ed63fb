use rust_decimal::Decimal;
use time::Date;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub department_id: Option<Uuid>,
    pub hire_date: Date,
    pub exit_date: Option<Date>,
    pub birth_date: Option<Date>,
    pub has_disability: bool,
    pub weekly_hours: Decimal,
    pub vacation_entitlement: Decimal,
    pub target_hours_daily: Option<i32>,
    pub target_hours_weekly: Option<i32>,
    pub target_hours_monthly: Option<i32>,
    pub target_hours_annual: Option<i32>,
    pub version: Uuid,
}

impl Employee {
    /// Whether the employment covers the given date.
    pub fn employed_on(&self, date: Date) -> bool {
        date >= self.hire_date && self.exit_date.is_none_or(|exit| date <= exit)
    }

    /// Daily target from the employee master, used when a day plan carries
    /// the `from_employee_master` flag.
    pub fn master_daily_target(&self) -> Option<i32> {
        self.target_hours_daily
    }
}

impl From<&dao::employee::EmployeeEntity> for Employee {
    fn from(entity: &dao::employee::EmployeeEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            department_id: entity.department_id,
            hire_date: entity.hire_date,
            exit_date: entity.exit_date,
            birth_date: entity.birth_date,
            has_disability: entity.has_disability,
            weekly_hours: entity.weekly_hours,
            vacation_entitlement: entity.vacation_entitlement,
            target_hours_daily: entity.target_hours_daily,
            target_hours_weekly: entity.target_hours_weekly,
            target_hours_monthly: entity.target_hours_monthly,
            target_hours_annual: entity.target_hours_annual,
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::employee::EmployeeEntity, Employee);
