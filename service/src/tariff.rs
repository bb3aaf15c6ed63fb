use std::collections::HashSet;

use time::Date;
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TariffType {
    Week,
    Rhythm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RhythmDay {
    pub day_index: i32,
    pub day_plan_id: Option<Uuid>,
}

/// Maps calendar dates to day plans for one employee: a weekly pattern or a
/// repeating rhythm. Exactly one of the two configurations is populated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tariff {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
    pub valid_from: Date,
    pub valid_to: Option<Date>,
    pub tariff_type: TariffType,
    pub week_plan_id: Option<Uuid>,
    pub rhythm_days: Option<i32>,
    pub rhythm_day_plans: Vec<RhythmDay>,
    pub version: Uuid,
}

impl Tariff {
    pub fn covers(&self, date: Date) -> bool {
        date >= self.valid_from && self.valid_to.is_none_or(|to| date <= to)
    }

    /// Configuration check on create/update: a week tariff needs a week
    /// plan, a rhythm tariff needs `rhythm_days` entries with unique day
    /// indexes in `[0, rhythm_days)`.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(to) = self.valid_to {
            if to < self.valid_from {
                return Err(ServiceError::InvalidTariffConfig(
                    "valid_to lies before valid_from",
                ));
            }
        }
        match self.tariff_type {
            TariffType::Week => {
                if self.week_plan_id.is_none() {
                    return Err(ServiceError::MissingWeekPlan);
                }
                Ok(())
            }
            TariffType::Rhythm => {
                let rhythm_days = self.rhythm_days.ok_or(ServiceError::MissingRhythmConfig)?;
                if rhythm_days <= 0 {
                    return Err(ServiceError::InvalidTariffConfig(
                        "rhythm_days must be positive",
                    ));
                }
                if self.rhythm_day_plans.len() != rhythm_days as usize {
                    return Err(ServiceError::MissingRhythmConfig);
                }
                let indexes: HashSet<i32> = self
                    .rhythm_day_plans
                    .iter()
                    .map(|day| day.day_index)
                    .collect();
                if indexes.len() != self.rhythm_day_plans.len()
                    || indexes.iter().any(|index| !(0..rhythm_days).contains(index))
                {
                    return Err(ServiceError::InvalidTariffConfig(
                        "rhythm day indexes must be unique and in range",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Rejects overlapping validity ranges within one employee's tariffs.
    pub fn validate_no_overlap(tariffs: &[Tariff]) -> Result<(), ServiceError> {
        for (position, tariff) in tariffs.iter().enumerate() {
            for other in tariffs.iter().skip(position + 1) {
                if tariff.employee_id != other.employee_id {
                    continue;
                }
                let tariff_end = tariff.valid_to.unwrap_or(Date::MAX);
                let other_end = other.valid_to.unwrap_or(Date::MAX);
                if tariff.valid_from <= other_end && other.valid_from <= tariff_end {
                    return Err(ServiceError::OverlappingTariff);
                }
            }
        }
        Ok(())
    }
}

impl From<&dao::tariff::TariffTypeEntity> for TariffType {
    fn from(tariff_type: &dao::tariff::TariffTypeEntity) -> Self {
        match tariff_type {
            dao::tariff::TariffTypeEntity::Week => Self::Week,
            dao::tariff::TariffTypeEntity::Rhythm => Self::Rhythm,
        }
    }
}

impl From<&dao::tariff::RhythmDayEntity> for RhythmDay {
    fn from(entity: &dao::tariff::RhythmDayEntity) -> Self {
        Self {
            day_index: entity.day_index,
            day_plan_id: entity.day_plan_id,
        }
    }
}

impl Tariff {
    pub fn from_entities(
        entity: &dao::tariff::TariffEntity,
        rhythm_days: &[dao::tariff::RhythmDayEntity],
    ) -> Self {
        let mut rhythm_day_plans: Vec<RhythmDay> =
            rhythm_days.iter().map(RhythmDay::from).collect();
        rhythm_day_plans.sort_by_key(|day| day.day_index);
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            employee_id: entity.employee_id,
            valid_from: entity.valid_from,
            valid_to: entity.valid_to,
            tariff_type: (&entity.tariff_type).into(),
            week_plan_id: entity.week_plan_id,
            rhythm_days: entity.rhythm_days,
            rhythm_day_plans,
            version: entity.version,
        }
    }
}
