use time::Date;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CappingType {
    YearEnd,
    MidYear,
    Monthly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CappingAction {
    Forfeit,
    TransferAccount,
    Payout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CappingRule {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub capping_type: CappingType,
    pub capping_month: Option<u8>,
    pub capping_day: Option<u8>,
    pub positive_cap: Option<i32>,
    pub negative_cap: Option<i32>,
    pub action: CappingAction,
    pub transfer_account_id: Option<Uuid>,
    pub priority: i32,
    pub version: Uuid,
}

impl CappingRule {
    /// Whether the rule fires when a month ending on `last_day` is
    /// evaluated. Monthly rules fire every month, year-end rules in
    /// December, mid-year rules in their configured month (and day, when
    /// one is configured, only if the month ends on or after it).
    pub fn should_apply_on(&self, last_day: Date) -> bool {
        match self.capping_type {
            CappingType::Monthly => true,
            CappingType::YearEnd => last_day.month() == time::Month::December,
            CappingType::MidYear => {
                let month_matches = self
                    .capping_month
                    .is_some_and(|month| u8::from(last_day.month()) == month);
                month_matches && self.capping_day.is_none_or(|day| last_day.day() >= day)
            }
        }
    }
}

/// Exempts one employee from one capping rule while the range is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CappingExemption {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub capping_rule_id: Uuid,
    pub valid_from: Date,
    pub valid_to: Option<Date>,
    pub version: Uuid,
}

impl CappingExemption {
    pub fn covers(&self, date: Date) -> bool {
        date >= self.valid_from && self.valid_to.is_none_or(|to| date <= to)
    }

    /// An exemption that ended before the date is reported as an advisory
    /// warning, never as an error.
    pub fn expired_before(&self, date: Date) -> bool {
        self.valid_to.is_some_and(|to| to < date)
    }
}

impl From<&dao::capping::CappingTypeEntity> for CappingType {
    fn from(capping_type: &dao::capping::CappingTypeEntity) -> Self {
        match capping_type {
            dao::capping::CappingTypeEntity::YearEnd => Self::YearEnd,
            dao::capping::CappingTypeEntity::MidYear => Self::MidYear,
            dao::capping::CappingTypeEntity::Monthly => Self::Monthly,
        }
    }
}

impl From<&dao::capping::CappingActionEntity> for CappingAction {
    fn from(action: &dao::capping::CappingActionEntity) -> Self {
        match action {
            dao::capping::CappingActionEntity::Forfeit => Self::Forfeit,
            dao::capping::CappingActionEntity::TransferAccount => Self::TransferAccount,
            dao::capping::CappingActionEntity::Payout => Self::Payout,
        }
    }
}

impl From<&dao::capping::CappingRuleEntity> for CappingRule {
    fn from(entity: &dao::capping::CappingRuleEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            capping_type: (&entity.capping_type).into(),
            capping_month: entity.capping_month,
            capping_day: entity.capping_day,
            positive_cap: entity.positive_cap,
            negative_cap: entity.negative_cap,
            action: (&entity.action).into(),
            transfer_account_id: entity.transfer_account_id,
            priority: entity.priority,
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::capping::CappingRuleEntity, CappingRule);

impl From<&dao::capping::CappingExemptionEntity> for CappingExemption {
    fn from(entity: &dao::capping::CappingExemptionEntity) -> Self {
        Self {
            id: entity.id,
            employee_id: entity.employee_id,
            capping_rule_id: entity.capping_rule_id,
            valid_from: entity.valid_from,
            valid_to: entity.valid_to,
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::capping::CappingExemptionEntity, CappingExemption);
