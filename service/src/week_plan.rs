use std::sync::Arc;

use terp_utils::DayOfWeek;
use uuid::Uuid;

/// Weekly pattern: day plan id per weekday, `None` marks an off day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekPlan {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: Arc<str>,
    pub days: [Option<Uuid>; 7],
    pub version: Uuid,
}

impl WeekPlan {
    pub fn day_plan_for(&self, day_of_week: DayOfWeek) -> Option<Uuid> {
        self.days[day_of_week.to_index() as usize]
    }
}

impl From<&dao::week_plan::WeekPlanEntity> for WeekPlan {
    fn from(entity: &dao::week_plan::WeekPlanEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            name: entity.name.clone(),
            days: [
                entity.monday,
                entity.tuesday,
                entity.wednesday,
                entity.thursday,
                entity.friday,
                entity.saturday,
                entity.sunday,
            ],
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::week_plan::WeekPlanEntity, WeekPlan);
