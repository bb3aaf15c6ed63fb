use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use time::Date;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorrectionType {
    Overtime,
    Undertime,
    Flextime,
    Vacation,
    Sick,
}

impl CorrectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionType::Overtime => "overtime",
            CorrectionType::Undertime => "undertime",
            CorrectionType::Flextime => "flextime",
            CorrectionType::Vacation => "vacation",
            CorrectionType::Sick => "sick",
        }
    }
}

/// Supervisor adjustment overlaying the calculated values. Time kinds carry
/// minutes in `amount`, vacation/sick carry days.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Correction {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub value_date: Date,
    pub correction_type: CorrectionType,
    pub amount: Decimal,
    pub reason: Arc<str>,
    pub approved_by: Option<Arc<str>>,
    pub version: Uuid,
}

impl Correction {
    pub fn is_approved(&self) -> bool {
        self.approved_by.is_some()
    }

    /// Whole-minute view of the amount for the time correction kinds.
    pub fn amount_minutes(&self) -> i32 {
        self.amount.round().to_i32().unwrap_or(0)
    }
}

impl From<&dao::correction::CorrectionTypeEntity> for CorrectionType {
    fn from(correction_type: &dao::correction::CorrectionTypeEntity) -> Self {
        match correction_type {
            dao::correction::CorrectionTypeEntity::Overtime => Self::Overtime,
            dao::correction::CorrectionTypeEntity::Undertime => Self::Undertime,
            dao::correction::CorrectionTypeEntity::Flextime => Self::Flextime,
            dao::correction::CorrectionTypeEntity::Vacation => Self::Vacation,
            dao::correction::CorrectionTypeEntity::Sick => Self::Sick,
        }
    }
}

impl From<&dao::correction::CorrectionEntity> for Correction {
    fn from(entity: &dao::correction::CorrectionEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            value_date: entity.value_date,
            correction_type: (&entity.correction_type).into(),
            amount: entity.amount,
            reason: entity.reason.clone(),
            approved_by: entity.approved_by.clone(),
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::correction::CorrectionEntity, Correction);
