use std::sync::Arc;

use rust_decimal::Decimal;
use time::Date;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsenceUnit {
    Day,
    Hour,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsenceCategory {
    Vacation,
    Sick,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsenceType {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub code: Arc<str>,
    pub name: Arc<str>,
    pub priority: i32,
    pub unit: AbsenceUnit,
    pub paid: bool,
    pub counts_as_worktime: bool,
    pub category: AbsenceCategory,
    pub version: Uuid,
}

/// One absence booking together with its resolved type. `duration` is the
/// day fraction, 0.50 or 1.00.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsenceDay {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub absence_type: AbsenceType,
    pub duration: Decimal,
    pub status: AbsenceStatus,
    pub version: Uuid,
}

impl AbsenceDay {
    pub fn is_approved(&self) -> bool {
        self.status == AbsenceStatus::Approved
    }

    pub fn is_full_day(&self) -> bool {
        self.duration >= Decimal::ONE
    }
}

impl From<&dao::absence::AbsenceUnitEntity> for AbsenceUnit {
    fn from(unit: &dao::absence::AbsenceUnitEntity) -> Self {
        match unit {
            dao::absence::AbsenceUnitEntity::Day => Self::Day,
            dao::absence::AbsenceUnitEntity::Hour => Self::Hour,
        }
    }
}

impl From<&dao::absence::AbsenceCategoryEntity> for AbsenceCategory {
    fn from(category: &dao::absence::AbsenceCategoryEntity) -> Self {
        match category {
            dao::absence::AbsenceCategoryEntity::Vacation => Self::Vacation,
            dao::absence::AbsenceCategoryEntity::Sick => Self::Sick,
            dao::absence::AbsenceCategoryEntity::Other => Self::Other,
        }
    }
}

impl From<&dao::absence::AbsenceStatusEntity> for AbsenceStatus {
    fn from(status: &dao::absence::AbsenceStatusEntity) -> Self {
        match status {
            dao::absence::AbsenceStatusEntity::Pending => Self::Pending,
            dao::absence::AbsenceStatusEntity::Approved => Self::Approved,
            dao::absence::AbsenceStatusEntity::Rejected => Self::Rejected,
        }
    }
}

impl From<&dao::absence::AbsenceTypeEntity> for AbsenceType {
    fn from(entity: &dao::absence::AbsenceTypeEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            code: entity.code.clone(),
            name: entity.name.clone(),
            priority: entity.priority,
            unit: (&entity.unit).into(),
            paid: entity.paid,
            counts_as_worktime: entity.counts_as_worktime,
            category: (&entity.category).into(),
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::absence::AbsenceTypeEntity, AbsenceType);

impl AbsenceDay {
    pub fn from_entities(
        day: &dao::absence::AbsenceDayEntity,
        absence_type: &dao::absence::AbsenceTypeEntity,
    ) -> Self {
        Self {
            id: day.id,
            employee_id: day.employee_id,
            date: day.date,
            absence_type: absence_type.into(),
            duration: day.duration,
            status: (&day.status).into(),
            version: day.version,
        }
    }
}
