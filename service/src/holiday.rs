use std::sync::Arc;

use time::Date;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolidayCategory {
    /// Category 1: full target credit.
    FullCredit,
    /// Category 2: half target credit.
    HalfCredit,
    /// Category 3: no credit, presence expected.
    NoCredit,
}

impl HolidayCategory {
    pub fn default_credit(&self, target: i32) -> i32 {
        match self {
            HolidayCategory::FullCredit => target,
            HolidayCategory::HalfCredit => target / 2,
            HolidayCategory::NoCredit => 0,
        }
    }

    pub fn code_suffix(&self) -> &'static str {
        match self {
            HolidayCategory::FullCredit => "FT1",
            HolidayCategory::HalfCredit => "FT2",
            HolidayCategory::NoCredit => "FT3",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Holiday {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub date: Date,
    pub name: Arc<str>,
    pub category: HolidayCategory,
    pub absence_code: Option<Arc<str>>,
    pub priority: i32,
    pub applies_to_all: bool,
    pub department_id: Option<Uuid>,
    pub is_half_day: bool,
    pub version: Uuid,
}

impl Holiday {
    /// Machine-readable code written into the daily warning list, the
    /// configured absence code or the category fallback.
    pub fn effective_code(&self) -> Arc<str> {
        self.absence_code
            .clone()
            .unwrap_or_else(|| self.category.code_suffix().into())
    }

    /// Whether this holiday applies to an employee of the given department.
    /// Department-scoped holidays match on exact department only.
    pub fn applies_to_department(&self, department_id: Option<Uuid>) -> bool {
        self.applies_to_all || (self.department_id.is_some() && self.department_id == department_id)
    }
}

impl From<&dao::holiday::HolidayCategoryEntity> for HolidayCategory {
    fn from(category: &dao::holiday::HolidayCategoryEntity) -> Self {
        match category {
            dao::holiday::HolidayCategoryEntity::FullCredit => Self::FullCredit,
            dao::holiday::HolidayCategoryEntity::HalfCredit => Self::HalfCredit,
            dao::holiday::HolidayCategoryEntity::NoCredit => Self::NoCredit,
        }
    }
}

impl From<&dao::holiday::HolidayEntity> for Holiday {
    fn from(entity: &dao::holiday::HolidayEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            date: entity.date,
            name: entity.name.clone(),
            category: (&entity.category).into(),
            absence_code: entity.absence_code.clone(),
            priority: entity.priority,
            applies_to_all: entity.applies_to_all,
            department_id: entity.department_id,
            is_half_day: entity.is_half_day,
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::holiday::HolidayEntity, Holiday);
